//! Outbound adapters implementing the domain ports.
//!
//! - `viacep`: HTTP postal-code directory (`PostalCodeLookup`).
//! - `storage`: directory-backed device storage (`KeyValueStorage`).

pub mod storage;
pub mod viacep;
