//! Reqwest-backed ViaCEP postal-code adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into the domain address.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{ViaCepAddressDto, ViaCepAnswer};
use crate::domain::ports::{PostalCodeLookup, PostalLookupError};
use crate::domain::{AddressLookupResult, PostalCode};

/// Public ViaCEP endpoint.
pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br/ws/";
const DEFAULT_USER_AGENT: &str = concat!("user-admin/", env!("CARGO_PKG_VERSION"));

/// Postal-code adapter issuing `GET {base}/{digits}/json/` requests.
pub struct ViaCepHttpSource {
    client: Client,
    base_url: Url,
}

impl ViaCepHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    /// ```rust,ignore
    /// let source = ViaCepHttpSource::new(base_url, Duration::from_secs(5));
    /// assert!(source.is_ok() || source.is_err());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    fn endpoint(&self, code: &PostalCode) -> Result<Url, PostalLookupError> {
        self.base_url
            .join(&format!("{code}/json/"))
            .map_err(|error| PostalLookupError::invalid_request(error.to_string()))
    }
}

#[async_trait]
impl PostalCodeLookup for ViaCepHttpSource {
    async fn lookup(&self, code: &PostalCode) -> Result<AddressLookupResult, PostalLookupError> {
        let endpoint = self.endpoint(code)?;
        debug!(url = %endpoint, "requesting ViaCEP address");
        let response = self
            .client
            .get(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        match parse_address(body.as_ref(), code)? {
            ViaCepAnswer::Address(address) => Ok(address),
            ViaCepAnswer::Unknown => Err(PostalLookupError::not_found(code.as_str())),
        }
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn parse_address(body: &[u8], code: &PostalCode) -> Result<ViaCepAnswer, PostalLookupError> {
    let decoded: ViaCepAddressDto = serde_json::from_slice(body).map_err(|error| {
        PostalLookupError::decode(format!("invalid ViaCEP JSON payload: {error}"))
    })?;
    decoded.into_answer(code).map_err(PostalLookupError::decode)
}

fn map_transport_error(error: reqwest::Error) -> PostalLookupError {
    if error.is_timeout() {
        PostalLookupError::timeout(error.to_string())
    } else {
        PostalLookupError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PostalLookupError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PostalLookupError::timeout(message)
        }
        _ if status.is_client_error() => PostalLookupError::invalid_request(message),
        _ => PostalLookupError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
