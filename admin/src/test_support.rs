//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, NaiveDate, Utc};
use mockable::Clock;

use crate::domain::{
    AddressLookupResult, BrazilianState, PostalCode, UserDetails, UserDraft, resolve,
};

/// A complete, valid working record living at Praça da Sé.
pub(crate) fn praca_da_se_draft() -> UserDraft {
    UserDraft {
        full_name: "Maria Aparecida Souza".to_owned(),
        document: "529.982.247-25".to_owned(),
        birth_date: NaiveDate::from_ymd_opt(1982, 3, 18),
        email: "maria.souza@example.com".to_owned(),
        email_verified: None,
        mobile: "(11) 98204-9999".to_owned(),
        zip_code: "01001-000".to_owned(),
        address_name: "Praça da Sé".to_owned(),
        number: "100".to_owned(),
        complement: String::new(),
        neighborhood: "Sé".to_owned(),
        city: "São Paulo".to_owned(),
        state: Some(BrazilianState::Sp),
    }
}

/// A second valid working record in Rio de Janeiro.
pub(crate) fn copacabana_draft() -> UserDraft {
    UserDraft {
        full_name: "João Pedro Lima".to_owned(),
        document: "111.444.777-35".to_owned(),
        birth_date: None,
        email: "joao.lima@example.com".to_owned(),
        email_verified: Some(true),
        mobile: "(21) 99876-5432".to_owned(),
        zip_code: "22070-011".to_owned(),
        address_name: "Avenida Atlântica".to_owned(),
        number: "1702".to_owned(),
        complement: "Apto 301".to_owned(),
        neighborhood: "Copacabana".to_owned(),
        city: "Rio de Janeiro".to_owned(),
        state: Some(BrazilianState::Rj),
    }
}

/// Validated details for `draft`, panicking when the fixture is invalid.
pub(crate) fn details(draft: &UserDraft) -> UserDetails {
    match resolve(draft) {
        Ok(details) => details,
        Err(outcome) => panic!("fixture draft must validate: {outcome:?}"),
    }
}

/// Lookup result for CEP 01001-000.
pub(crate) fn praca_da_se_address() -> AddressLookupResult {
    AddressLookupResult {
        postal_code: PostalCode::new("01001-000"),
        address_name: "Praça da Sé".to_owned(),
        neighborhood: "Sé".to_owned(),
        city: "São Paulo".to_owned(),
        state: BrazilianState::Sp,
    }
}

/// Clock frozen at one instant.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
