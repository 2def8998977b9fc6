//! Driven port for resolving Brazilian postal codes to addresses.
//!
//! Adapters surface rich failure kinds; the domain's lookup client folds
//! them all into "not found" before the form sees them.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AddressLookupResult, PostalCode};

define_port_error! {
    /// Errors surfaced while calling a postal-code directory.
    pub enum PostalLookupError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "postal lookup transport failed: {message}",
        /// The directory did not answer in time.
        Timeout { message: String } =>
            "postal lookup timed out: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "postal lookup response decode failed: {message}",
        /// The directory rejected the code as malformed.
        InvalidRequest { message: String } =>
            "postal lookup request invalid: {message}",
        /// The directory has no address for the code.
        NotFound { postal_code: String } =>
            "postal code {postal_code} not found",
    }
}

/// Port for resolving one postal code with a single outbound call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostalCodeLookup: Send + Sync {
    /// Resolve a digits-only, non-empty postal code.
    async fn lookup(&self, code: &PostalCode) -> Result<AddressLookupResult, PostalLookupError>;
}

/// Fixture implementation that knows no postal codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixturePostalCodeLookup;

#[async_trait]
impl PostalCodeLookup for FixturePostalCodeLookup {
    async fn lookup(&self, code: &PostalCode) -> Result<AddressLookupResult, PostalLookupError> {
        Err(PostalLookupError::not_found(code.as_str()))
    }
}
