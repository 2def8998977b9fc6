//! Declarative validation schema for user records.
//!
//! The schema transforms the working record (mobile gains the `+55` country
//! code, postal code drops non-digits), checks every rule, and reports all
//! failing fields together. It is pure: no I/O, no clock.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::{BrazilianState, PostalCode, UserDetails, UserRecord, digits_only};

/// Country calling code prefixed to mobile numbers.
pub const MOBILE_COUNTRY_CODE: &str = "55";

/// Longest national mobile number (two-digit area code plus nine digits).
const NATIONAL_MOBILE_MAX_DIGITS: usize = 11;

/// Form fields, in the order the form lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserField {
    /// Nome Completo.
    FullName,
    /// CPF, free text.
    Document,
    /// Data de Nascimento.
    BirthDate,
    /// E-mail.
    Email,
    /// Celular.
    Mobile,
    /// CEP; blurring it triggers the postal lookup.
    ZipCode,
    /// Endereço.
    AddressName,
    /// Número.
    Number,
    /// Complemento.
    Complement,
    /// Bairro.
    Neighborhood,
    /// Cidade.
    City,
    /// Estado.
    State,
    /// Email Pré-verificado checkbox.
    EmailVerified,
}

impl UserField {
    /// Fields overwritten by a postal-code lookup.
    pub const ADDRESS_DEPENDENTS: [Self; 4] =
        [Self::AddressName, Self::Neighborhood, Self::City, Self::State];

    /// Persisted (camelCase) field name.
    pub const fn key(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Document => "document",
            Self::BirthDate => "birthDate",
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::ZipCode => "zipCode",
            Self::AddressName => "addressName",
            Self::Number => "number",
            Self::Complement => "complement",
            Self::Neighborhood => "neighborhood",
            Self::City => "city",
            Self::State => "state",
            Self::EmailVerified => "emailVerified",
        }
    }

    /// Label shown next to the input.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Nome Completo",
            Self::Document => "CPF",
            Self::BirthDate => "Data de Nascimento",
            Self::Email => "E-mail",
            Self::Mobile => "Celular",
            Self::ZipCode => "CEP",
            Self::AddressName => "Endereço",
            Self::Number => "Número",
            Self::Complement => "Complemento",
            Self::Neighborhood => "Bairro",
            Self::City => "Cidade",
            Self::State => "Estado",
            Self::EmailVerified => "Email Pré-verificado",
        }
    }

    /// Whether a postal-code lookup overwrites this field.
    pub fn is_address_dependent(self) -> bool {
        Self::ADDRESS_DEPENDENTS.contains(&self)
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Field is empty after trimming.
    Required,
    /// Value does not match the e-mail grammar.
    InvalidEmail,
}

impl FieldError {
    /// Message rendered next to the field.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Required => "Este campo é obrigatório",
            Self::InvalidEmail => "E-mail não reconhecido",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// All field errors produced by one validation pass.
///
/// Empty means the candidate is eligible for submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    errors: BTreeMap<UserField, FieldError>,
}

impl ValidationOutcome {
    /// Whether no field failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error recorded for `field`, if any.
    pub fn error(&self, field: UserField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failing fields with their errors, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (UserField, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }

    fn record(&mut self, field: UserField, error: FieldError) {
        self.errors.insert(field, error);
    }
}

/// Working copy of a user record while a form session edits it.
///
/// Every text field holds whatever the user typed; nothing is checked until
/// [`validate`] or [`resolve`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    /// Full name as typed.
    pub full_name: String,
    /// CPF as typed.
    pub document: String,
    /// Optional birth date.
    pub birth_date: Option<NaiveDate>,
    /// E-mail as typed.
    pub email: String,
    /// Absent means `false`.
    pub email_verified: Option<bool>,
    /// Mobile in any format; normalised on submit.
    pub mobile: String,
    /// Postal code, masked or not.
    pub zip_code: String,
    /// Street line.
    pub address_name: String,
    /// House number.
    pub number: String,
    /// Optional complement.
    pub complement: String,
    /// Neighbourhood.
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// A select input: one of the 27 units or nothing.
    pub state: Option<BrazilianState>,
}

impl UserDraft {
    /// Text currently held by a free-text field, or `None` for fields that
    /// are not free text (birth date, state, e-mail verification).
    pub fn text(&self, field: UserField) -> Option<&str> {
        let value = match field {
            UserField::FullName => &self.full_name,
            UserField::Document => &self.document,
            UserField::Email => &self.email,
            UserField::Mobile => &self.mobile,
            UserField::ZipCode => &self.zip_code,
            UserField::AddressName => &self.address_name,
            UserField::Number => &self.number,
            UserField::Complement => &self.complement,
            UserField::Neighborhood => &self.neighborhood,
            UserField::City => &self.city,
            UserField::BirthDate | UserField::State | UserField::EmailVerified => return None,
        };
        Some(value.as_str())
    }

    /// Mutable access to a free-text field.
    pub(crate) fn text_mut(&mut self, field: UserField) -> Option<&mut String> {
        let value = match field {
            UserField::FullName => &mut self.full_name,
            UserField::Document => &mut self.document,
            UserField::Email => &mut self.email,
            UserField::Mobile => &mut self.mobile,
            UserField::ZipCode => &mut self.zip_code,
            UserField::AddressName => &mut self.address_name,
            UserField::Number => &mut self.number,
            UserField::Complement => &mut self.complement,
            UserField::Neighborhood => &mut self.neighborhood,
            UserField::City => &mut self.city,
            UserField::BirthDate | UserField::State | UserField::EmailVerified => return None,
        };
        Some(value)
    }
}

impl From<&UserDetails> for UserDraft {
    fn from(details: &UserDetails) -> Self {
        Self {
            full_name: details.full_name.clone(),
            document: details.document.clone(),
            birth_date: details.birth_date,
            email: details.email.clone(),
            email_verified: Some(details.email_verified),
            mobile: details.mobile.clone(),
            zip_code: details.zip_code.as_str().to_owned(),
            address_name: details.address_name.clone(),
            number: details.number.clone(),
            complement: details.complement.clone(),
            neighborhood: details.neighborhood.clone(),
            city: details.city.clone(),
            state: Some(details.state),
        }
    }
}

impl From<&UserRecord> for UserDraft {
    fn from(record: &UserRecord) -> Self {
        Self::from(record.details())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // WHATWG "valid e-mail address" grammar.
        let pattern = concat!(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
            r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `value` matches the e-mail address grammar.
///
/// # Examples
/// ```
/// use user_admin::domain::is_valid_email;
///
/// assert!(is_valid_email("ana@example.com"));
/// assert!(!is_valid_email("not-an-email"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Rewrite a mobile number as `+55` followed by digits.
///
/// Numbers whose digits already carry the country code are kept, so the
/// rewrite is idempotent. Input without a single digit normalises to the
/// empty string, which the schema reports as a missing mobile.
///
/// # Examples
/// ```
/// use user_admin::domain::normalize_mobile;
///
/// assert_eq!(normalize_mobile("(12) 98204-9999"), "+5512982049999");
/// assert_eq!(normalize_mobile("+5512982049999"), "+5512982049999");
/// assert_eq!(normalize_mobile("  "), "");
/// assert_eq!(normalize_mobile("abc"), "");
/// ```
pub fn normalize_mobile(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.is_empty() {
        return String::new();
    }
    if digits.len() > NATIONAL_MOBILE_MAX_DIGITS && digits.starts_with(MOBILE_COUNTRY_CODE) {
        format!("+{digits}")
    } else {
        format!("+{MOBILE_COUNTRY_CODE}{digits}")
    }
}

/// Run the schema and return every field error.
///
/// Calling it twice on the same draft yields the same outcome.
pub fn validate(draft: &UserDraft) -> ValidationOutcome {
    resolve(draft).err().unwrap_or_default()
}

/// Run the schema and, when every rule holds, return the transformed
/// [`UserDetails`] ready to be committed.
pub fn resolve(draft: &UserDraft) -> Result<UserDetails, ValidationOutcome> {
    let mut outcome = ValidationOutcome::default();

    let full_name = required(&mut outcome, UserField::FullName, &draft.full_name);
    let document = required(&mut outcome, UserField::Document, &draft.document);
    let email = required(&mut outcome, UserField::Email, &draft.email);
    if !email.is_empty() && !is_valid_email(&email) {
        outcome.record(UserField::Email, FieldError::InvalidEmail);
    }
    let mobile = normalize_mobile(&draft.mobile);
    if mobile.is_empty() {
        outcome.record(UserField::Mobile, FieldError::Required);
    }
    let zip_code = PostalCode::new(&draft.zip_code);
    if zip_code.is_empty() {
        outcome.record(UserField::ZipCode, FieldError::Required);
    }
    let address_name = required(&mut outcome, UserField::AddressName, &draft.address_name);
    let number = required(&mut outcome, UserField::Number, &draft.number);
    let neighborhood = required(&mut outcome, UserField::Neighborhood, &draft.neighborhood);
    let city = required(&mut outcome, UserField::City, &draft.city);
    if draft.state.is_none() {
        outcome.record(UserField::State, FieldError::Required);
    }

    let Some(state) = draft.state.filter(|_| outcome.is_valid()) else {
        return Err(outcome);
    };

    Ok(UserDetails {
        full_name,
        document,
        birth_date: draft.birth_date,
        email,
        email_verified: draft.email_verified.unwrap_or(false),
        mobile,
        zip_code,
        address_name,
        number,
        complement: draft.complement.trim().to_owned(),
        neighborhood,
        city,
        state,
    })
}

fn required(outcome: &mut ValidationOutcome, field: UserField, raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        outcome.record(field, FieldError::Required);
    }
    trimmed.to_owned()
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
