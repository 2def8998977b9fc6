//! Deterministic user generation from a numeric seed.
//!
//! The same seed and count always produce identical output.

use chrono::NaiveDate;
use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::PT_BR;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::addresses::{SAMPLE_ADDRESSES, SampleAddress};
use crate::cpf::{CPF_DIGITS, cpf_check_digits, format_cpf};
use crate::error::GenerationError;
use crate::user::DemoUser;

/// Largest batch produced by one call.
pub const MAX_DEMO_USERS: usize = 1_000;

/// Maximum number of attempts to generate a usable full name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Birth years are drawn from this inclusive range.
const BIRTH_YEARS: std::ops::RangeInclusive<i32> = 1950..=2005;

/// Probability of a pre-verified e-mail (1 in 2).
const VERIFIED_NUMERATOR: u32 = 1;
const VERIFIED_DENOMINATOR: u32 = 2;

/// Probability of an apartment complement (3 in 10).
const COMPLEMENT_NUMERATOR: u32 = 3;
const COMPLEMENT_DENOMINATOR: u32 = 10;

const EMAIL_DOMAIN: &str = "example.com";

/// Generates `count` sample users from `seed`.
///
/// Every user has a valid CPF, a mobile number in the area code of its
/// address, a birth date between 1950 and 2005, and an address taken from
/// a fixed table of real postal codes.
///
/// # Errors
///
/// Returns [`GenerationError`] if:
/// - `count` exceeds [`MAX_DEMO_USERS`]
/// - full name generation fails after maximum retries
///
/// # Example
///
/// ```
/// use demo_users::generate_demo_users;
///
/// let users = generate_demo_users(2026, 3).expect("generated");
/// assert_eq!(users.len(), 3);
///
/// // Same seed produces identical users
/// assert_eq!(users, generate_demo_users(2026, 3).expect("generated"));
/// ```
pub fn generate_demo_users(seed: u64, count: usize) -> Result<Vec<DemoUser>, GenerationError> {
    if count > MAX_DEMO_USERS {
        return Err(GenerationError::CountTooLarge {
            requested: count,
            max: MAX_DEMO_USERS,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|index| generate_single_user(&mut rng, index))
        .collect()
}

fn generate_single_user(rng: &mut ChaCha8Rng, index: usize) -> Result<DemoUser, GenerationError> {
    let (first, surnames) = generate_full_name(rng)?;
    let last = surnames.last().cloned().unwrap_or_default();
    let full_name = format!("{first} {}", surnames.join(" "));
    let address = SAMPLE_ADDRESSES[rng.random_range(0..SAMPLE_ADDRESSES.len())];

    let complement = if rng.random_ratio(COMPLEMENT_NUMERATOR, COMPLEMENT_DENOMINATOR) {
        format!("Apto {}", rng.random_range(11..=1504_u32))
    } else {
        String::new()
    };

    Ok(DemoUser {
        email: email_for(&first, &last, index),
        full_name,
        document: generate_cpf(rng),
        birth_date: generate_birth_date(rng)?,
        email_verified: rng.random_ratio(VERIFIED_NUMERATOR, VERIFIED_DENOMINATOR),
        mobile: generate_mobile(rng, address),
        zip_code: address.zip_code.to_owned(),
        address_name: address.address_name.to_owned(),
        number: rng.random_range(1..=2_000_u32).to_string(),
        complement,
        neighborhood: address.neighborhood.to_owned(),
        city: address.city.to_owned(),
        state: address.state.to_owned(),
    })
}

/// Generates a first name and two surnames.
///
/// Retries up to `MAX_NAME_ATTEMPTS` times when a generated part is empty
/// or contains characters a person would not type into a name field.
fn generate_full_name(rng: &mut ChaCha8Rng) -> Result<(String, Vec<String>), GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(PT_BR).fake_with_rng(rng);
        let middle: String = LastName(PT_BR).fake_with_rng(rng);
        let last: String = LastName(PT_BR).fake_with_rng(rng);

        let parts = [first.trim(), middle.trim(), last.trim()];
        if parts.iter().all(|part| is_name_part(part)) {
            return Ok((
                parts[0].to_owned(),
                vec![parts[1].to_owned(), parts[2].to_owned()],
            ));
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn is_name_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|ch| ch.is_alphabetic() || matches!(ch, ' ' | '\'' | '-'))
}

fn generate_cpf(rng: &mut ChaCha8Rng) -> String {
    let mut base = [0_u8; 9];
    loop {
        for digit in &mut base {
            *digit = rng.random_range(0..=9);
        }
        if base.iter().any(|digit| *digit != base[0]) {
            break;
        }
    }
    let [first, second] = cpf_check_digits(&base);
    let mut digits = [0_u8; CPF_DIGITS];
    digits[..9].copy_from_slice(&base);
    digits[9] = first;
    digits[10] = second;
    format_cpf(&digits)
}

fn generate_mobile(rng: &mut ChaCha8Rng, address: SampleAddress) -> String {
    format!(
        "({}) 9{:04}-{:04}",
        address.area_code,
        rng.random_range(0..10_000_u32),
        rng.random_range(0..10_000_u32)
    )
}

fn generate_birth_date(rng: &mut ChaCha8Rng) -> Result<NaiveDate, GenerationError> {
    let year = rng.random_range(BIRTH_YEARS);
    let ordinal = rng.random_range(1..=365_u32);
    NaiveDate::from_yo_opt(year, ordinal).ok_or(GenerationError::InvalidBirthDate { year, ordinal })
}

/// Lower-case ASCII e-mail `first.last<index>@example.com`.
fn email_for(first: &str, last: &str, index: usize) -> String {
    format!(
        "{}.{}{index}@{EMAIL_DOMAIN}",
        ascii_fold(first),
        ascii_fold(last)
    )
}

/// Drops accents and keeps only ASCII letters and digits.
fn ascii_fold(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter_map(|ch| match ch {
            'á' | 'à' | 'â' | 'ã' | 'ä' => Some('a'),
            'é' | 'è' | 'ê' | 'ë' => Some('e'),
            'í' | 'ì' | 'î' | 'ï' => Some('i'),
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => Some('o'),
            'ú' | 'ù' | 'û' | 'ü' => Some('u'),
            'ç' => Some('c'),
            'ñ' => Some('n'),
            other if other.is_ascii_alphanumeric() => Some(other),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::cpf::is_valid_cpf;

    fn users() -> Vec<DemoUser> {
        generate_demo_users(42, 25).expect("generation should succeed")
    }

    #[test]
    fn generates_requested_count() {
        assert_eq!(users().len(), 25);
        assert!(generate_demo_users(42, 0).expect("empty batch").is_empty());
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(users(), users());
    }

    #[test]
    fn different_seeds_produce_different_users() {
        let first = generate_demo_users(1, 5).expect("generated");
        let second = generate_demo_users(2, 5).expect("generated");
        assert_ne!(first, second);
    }

    #[test]
    fn rejects_oversized_batches() {
        assert_eq!(
            generate_demo_users(1, MAX_DEMO_USERS + 1),
            Err(GenerationError::CountTooLarge {
                requested: MAX_DEMO_USERS + 1,
                max: MAX_DEMO_USERS,
            })
        );
    }

    #[test]
    fn documents_are_valid_cpfs() {
        for user in users() {
            assert!(is_valid_cpf(&user.document), "invalid CPF {}", user.document);
            assert_eq!(user.document.len(), 14);
        }
    }

    #[test]
    fn mobiles_use_the_area_code_of_the_address() {
        for user in users() {
            let address = SAMPLE_ADDRESSES
                .iter()
                .find(|address| address.zip_code == user.zip_code)
                .expect("address comes from the table");
            assert!(
                user.mobile.starts_with(&format!("({}) 9", address.area_code)),
                "unexpected mobile {}",
                user.mobile
            );
            assert_eq!(user.mobile.chars().count(), 15);
            assert_eq!(user.city, address.city);
            assert_eq!(user.state, address.state);
        }
    }

    #[test]
    fn birth_dates_fall_in_range() {
        for user in users() {
            let year = chrono::Datelike::year(&user.birth_date);
            assert!(BIRTH_YEARS.contains(&year), "year {year} out of range");
        }
    }

    #[test]
    fn emails_are_lower_case_ascii_and_unique() {
        let generated = users();
        let mut seen = std::collections::HashSet::new();
        for user in &generated {
            assert!(user.email.is_ascii(), "non-ASCII e-mail {}", user.email);
            assert!(user.email.ends_with("@example.com"));
            assert!(seen.insert(user.email.clone()), "duplicate {}", user.email);
        }
    }

    #[test]
    fn full_names_have_three_parts() {
        for user in users() {
            assert!(
                user.full_name.split_whitespace().count() >= 3,
                "short name {}",
                user.full_name
            );
        }
    }

    #[rstest]
    #[case("João", "joao")]
    #[case("Conceição", "conceicao")]
    #[case("D'Ávila", "davila")]
    #[case("Müller-Souza", "mullersouza")]
    fn folds_names_to_ascii(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(ascii_fold(raw), expected);
    }

    #[test]
    fn serialises_with_camel_case_keys() {
        let user = users().remove(0);
        let json = serde_json::to_value(&user).expect("serialise");
        assert!(json.get("fullName").is_some());
        assert!(json.get("zipCode").is_some());
        assert!(json.get("birthDate").is_some());
    }
}
