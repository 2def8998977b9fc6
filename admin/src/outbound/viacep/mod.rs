//! ViaCEP outbound adapter.
//!
//! This module provides a thin HTTP implementation of the
//! `PostalCodeLookup` port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_VIACEP_BASE_URL, ViaCepHttpSource};
