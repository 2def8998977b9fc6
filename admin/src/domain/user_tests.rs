//! Tests for the user record model.

use super::*;
use rstest::rstest;
use serde_json::{Value, json};

use crate::test_support::{copacabana_draft, details, praca_da_se_draft};

#[rstest]
#[case::uuid("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case::legacy_sequence("1")]
fn accepts_opaque_ids(#[case] raw: &str) {
    let id = UserId::new(raw).expect("id should be accepted");
    assert_eq!(id.as_str(), raw);
}

#[rstest]
#[case("", UserIdValidationError::EmptyId)]
#[case(" 1", UserIdValidationError::PaddedId)]
#[case("1\n", UserIdValidationError::PaddedId)]
fn rejects_empty_or_padded_ids(#[case] raw: &str, #[case] expected: UserIdValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[test]
fn random_ids_are_distinct_uuids() {
    let first = UserId::random();
    let second = UserId::random();
    assert_ne!(first, second);
    assert!(Uuid::parse_str(first.as_str()).is_ok());
}

#[test]
fn record_serialises_flat_with_camel_case_keys() {
    let id = UserId::new("7").expect("valid id");
    let record = UserRecord::new(id, details(&praca_da_se_draft()));

    let value = serde_json::to_value(&record).expect("serialise");

    assert_eq!(value["id"], json!("7"));
    assert_eq!(value["fullName"], json!("Maria Aparecida Souza"));
    assert_eq!(value["birthDate"], json!("1982-03-18"));
    assert_eq!(value["emailVerified"], json!(false));
    assert_eq!(value["mobile"], json!("+5511982049999"));
    assert_eq!(value["zipCode"], json!("01001000"));
    assert_eq!(value["addressName"], json!("Praça da Sé"));
    assert_eq!(value["state"], json!("SP"));
}

#[test]
fn record_without_optional_fields_round_trips() {
    let id = UserId::random();
    let record = UserRecord::new(id, details(&copacabana_draft()));

    let text = serde_json::to_string(&record).expect("serialise");
    let value: Value = serde_json::from_str(&text).expect("json");
    assert!(value.get("birthDate").is_none());

    let back: UserRecord = serde_json::from_str(&text).expect("deserialise");
    assert_eq!(back, record);
}

#[test]
fn deserialising_rejects_unknown_state() {
    let payload = json!({
        "id": "1",
        "fullName": "Ana",
        "document": "1",
        "email": "ana@example.com",
        "mobile": "+5511999999999",
        "zipCode": "01001000",
        "addressName": "Rua A",
        "number": "1",
        "neighborhood": "Centro",
        "city": "São Paulo",
        "state": "XX"
    });
    assert!(serde_json::from_value::<UserRecord>(payload).is_err());
}

#[test]
fn missing_flags_default_when_loading() {
    let payload = json!({
        "id": "1",
        "fullName": "Ana",
        "document": "1",
        "email": "ana@example.com",
        "mobile": "+5511999999999",
        "zipCode": "01001-000",
        "addressName": "Rua A",
        "number": "1",
        "neighborhood": "Centro",
        "city": "São Paulo",
        "state": "SP"
    });
    let record: UserRecord = serde_json::from_value(payload).expect("deserialise");
    assert!(!record.details().email_verified());
    assert_eq!(record.details().complement(), "");
    assert_eq!(record.details().zip_code().as_str(), "01001000");
}
