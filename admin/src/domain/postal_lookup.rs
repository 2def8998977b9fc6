//! Postal lookup client used by the form controller.
//!
//! The client owns the public lookup contract: input is reduced to digits,
//! empty input never reaches the network, the outbound call is bounded by a
//! timeout, and every failure collapses into [`LookupOutcome::NotFound`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::ports::{PostalCodeLookup, PostalLookupError};
use super::{AddressLookupResult, PostalCode};

/// Default bound on one outbound lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of one lookup as seen by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The directory returned a usable address.
    Found(AddressLookupResult),
    /// Unknown code, unreachable service, bad payload or timeout.
    NotFound,
}

impl LookupOutcome {
    /// Borrow the address when found.
    pub fn address(&self) -> Option<&AddressLookupResult> {
        match self {
            Self::Found(address) => Some(address),
            Self::NotFound => None,
        }
    }
}

/// Postal lookup client wrapping a [`PostalCodeLookup`] adapter.
pub struct PostalLookupClient<L> {
    source: Arc<L>,
    timeout: Duration,
}

impl<L> Clone for PostalLookupClient<L> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            timeout: self.timeout,
        }
    }
}

impl<L> PostalLookupClient<L> {
    /// Create a client with [`DEFAULT_LOOKUP_TIMEOUT`].
    pub fn new(source: Arc<L>) -> Self {
        Self::with_timeout(source, DEFAULT_LOOKUP_TIMEOUT)
    }

    /// Create a client with an explicit per-call timeout.
    pub fn with_timeout(source: Arc<L>, timeout: Duration) -> Self {
        Self { source, timeout }
    }
}

impl<L> PostalLookupClient<L>
where
    L: PostalCodeLookup,
{
    /// Resolve `raw` to an address.
    ///
    /// Non-digits are stripped first; when nothing remains the call
    /// short-circuits to [`LookupOutcome::NotFound`] without touching the
    /// adapter.
    pub async fn lookup(&self, raw: &str) -> LookupOutcome {
        let code = PostalCode::new(raw);
        if code.is_empty() {
            debug!("postal lookup skipped: no digits in input");
            return LookupOutcome::NotFound;
        }

        let result = match tokio::time::timeout(self.timeout, self.source.lookup(&code)).await {
            Ok(result) => result,
            Err(_) => Err(PostalLookupError::timeout(format!(
                "no answer within {} ms",
                self.timeout.as_millis()
            ))),
        };

        match result {
            Ok(address) if address.address_name.trim().is_empty() => {
                debug!(postal_code = %code, "postal lookup returned an empty address line");
                LookupOutcome::NotFound
            }
            Ok(address) => LookupOutcome::Found(address),
            Err(PostalLookupError::NotFound { .. }) => {
                debug!(postal_code = %code, "postal code not found");
                LookupOutcome::NotFound
            }
            Err(error) => {
                warn!(postal_code = %code, %error, "postal lookup failed");
                LookupOutcome::NotFound
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Contract coverage for the lookup client.

    use super::*;
    use crate::domain::ports::MockPostalCodeLookup;
    use crate::test_support::praca_da_se_address;
    use async_trait::async_trait;
    use rstest::rstest;

    fn client(source: MockPostalCodeLookup) -> PostalLookupClient<MockPostalCodeLookup> {
        PostalLookupClient::new(Arc::new(source))
    }

    #[rstest]
    #[case("")]
    #[case("-----")]
    #[case("abc.def")]
    #[tokio::test]
    async fn input_without_digits_short_circuits(#[case] raw: &str) {
        let mut source = MockPostalCodeLookup::new();
        source.expect_lookup().times(0);

        assert_eq!(client(source).lookup(raw).await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn strips_non_digits_before_calling_the_adapter() {
        let mut source = MockPostalCodeLookup::new();
        source
            .expect_lookup()
            .withf(|code| code.as_str() == "01001000")
            .times(1)
            .return_once(|_| Ok(praca_da_se_address()));

        let outcome = client(source).lookup("01001-000").await;

        assert_eq!(outcome, LookupOutcome::Found(praca_da_se_address()));
    }

    #[rstest]
    #[case::not_found(PostalLookupError::not_found("00000000"))]
    #[case::transport(PostalLookupError::transport("connection refused"))]
    #[case::decode(PostalLookupError::decode("expected value"))]
    #[case::invalid(PostalLookupError::invalid_request("status 400"))]
    #[case::timeout(PostalLookupError::timeout("deadline elapsed"))]
    #[tokio::test]
    async fn every_failure_collapses_to_not_found(#[case] error: PostalLookupError) {
        let mut source = MockPostalCodeLookup::new();
        source.expect_lookup().times(1).return_once(move |_| Err(error));

        assert_eq!(client(source).lookup("00000-000").await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn empty_address_line_is_not_found() {
        let mut address = praca_da_se_address();
        address.address_name = "  ".to_owned();
        let mut source = MockPostalCodeLookup::new();
        source.expect_lookup().times(1).return_once(move |_| Ok(address));

        assert_eq!(client(source).lookup("01001000").await, LookupOutcome::NotFound);
    }

    struct StalledLookup;

    #[async_trait]
    impl PostalCodeLookup for StalledLookup {
        async fn lookup(
            &self,
            _code: &PostalCode,
        ) -> Result<AddressLookupResult, PostalLookupError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(praca_da_se_address())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_directory_times_out_as_not_found() {
        let client =
            PostalLookupClient::with_timeout(Arc::new(StalledLookup), Duration::from_millis(50));

        assert_eq!(client.lookup("01001000").await, LookupOutcome::NotFound);
    }
}
