//! Argument parsing tests for the console.

use chrono::NaiveDate;
use clap::Parser;
use rstest::rstest;

use super::*;
use crate::domain::BrazilianState;

fn parse(args: &[&str]) -> Command {
    let argv = std::iter::once("user-admin").chain(args.iter().copied());
    Cli::try_parse_from(argv).expect("arguments parse").command
}

#[test]
fn list_defaults_to_the_first_page() {
    assert!(matches!(
        parse(&["list"]),
        Command::List {
            page: 0,
            page_size: None
        }
    ));
}

#[test]
fn list_accepts_page_and_size() {
    assert!(matches!(
        parse(&["list", "--page", "2", "--page-size", "25"]),
        Command::List {
            page: 2,
            page_size: Some(25)
        }
    ));
}

#[test]
fn seed_uses_defaults() {
    let Command::Seed { seed, count } = parse(&["seed"]) else {
        panic!("expected seed command");
    };
    assert_eq!(seed, DEFAULT_DEMO_SEED);
    assert_eq!(count, DEFAULT_DEMO_COUNT);
}

#[test]
fn create_collects_form_fields() {
    let command = parse(&[
        "create",
        "--full-name",
        "Maria Aparecida Souza",
        "--birth-date",
        "1982-03-18",
        "--email-verified",
        "true",
        "--zip-code",
        "01001-000",
        "--state",
        "sp",
    ]);

    let Command::Create(fields) = command else {
        panic!("expected create command");
    };
    assert_eq!(
        fields,
        UserFieldArgs {
            full_name: Some("Maria Aparecida Souza".to_owned()),
            birth_date: NaiveDate::from_ymd_opt(1982, 3, 18),
            email_verified: Some(true),
            zip_code: Some("01001-000".to_owned()),
            state: Some(BrazilianState::Sp),
            ..UserFieldArgs::default()
        }
    );
}

#[test]
fn edit_takes_an_identity_and_fields() {
    let Command::Edit { id, fields } = parse(&["edit", "abc-123", "--number", "42"]) else {
        panic!("expected edit command");
    };
    assert_eq!(id, "abc-123");
    assert_eq!(fields.number.as_deref(), Some("42"));
    assert_eq!(fields.full_name, None);
}

#[rstest]
#[case::unknown_state(&["create", "--state", "XX"])]
#[case::bad_date(&["create", "--birth-date", "18/03/1982"])]
#[case::missing_identity(&["show"])]
#[case::unknown_command(&["export"])]
fn rejects_malformed_arguments(#[case] args: &[&str]) {
    let argv = std::iter::once("user-admin").chain(args.iter().copied());
    assert!(Cli::try_parse_from(argv).is_err());
}
