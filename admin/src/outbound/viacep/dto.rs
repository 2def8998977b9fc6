//! DTOs for decoding ViaCEP JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into the
//! domain `AddressLookupResult` in one pass.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{AddressLookupResult, BrazilianState, PostalCode};

#[derive(Debug, Deserialize)]
pub(super) struct ViaCepAddressDto {
    #[serde(default)]
    pub(super) cep: String,
    #[serde(default)]
    pub(super) logradouro: String,
    #[serde(default)]
    pub(super) bairro: String,
    #[serde(default)]
    pub(super) localidade: String,
    #[serde(default)]
    pub(super) uf: String,
    /// Present on unknown codes; older deployments send `true`, newer ones
    /// the string `"true"`.
    #[serde(default)]
    pub(super) erro: Option<Value>,
}

/// Outcome of mapping one decoded payload.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum ViaCepAnswer {
    Address(AddressLookupResult),
    Unknown,
}

impl ViaCepAddressDto {
    fn is_error_marker(&self) -> bool {
        match &self.erro {
            None | Some(Value::Null | Value::Bool(false)) => false,
            Some(Value::String(flag)) => flag != "false",
            Some(_) => true,
        }
    }

    pub(super) fn into_answer(self, requested: &PostalCode) -> Result<ViaCepAnswer, String> {
        if self.is_error_marker() {
            return Ok(ViaCepAnswer::Unknown);
        }
        let state: BrazilianState = self
            .uf
            .parse()
            .map_err(|error| format!("postal code {requested}: {error}"))?;
        let postal_code = if self.cep.trim().is_empty() {
            requested.clone()
        } else {
            PostalCode::new(&self.cep)
        };

        Ok(ViaCepAnswer::Address(AddressLookupResult {
            postal_code,
            address_name: self.logradouro.trim().to_owned(),
            neighborhood: self.bairro.trim().to_owned(),
            city: self.localidade.trim().to_owned(),
            state,
        }))
    }
}
