//! User record data model.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BrazilianState, PostalCode};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdValidationError {
    /// The identifier is the empty string.
    EmptyId,
    /// The identifier starts or ends with whitespace.
    PaddedId,
}

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::PaddedId => write!(f, "user id must not contain surrounding whitespace"),
        }
    }
}

impl std::error::Error for UserIdValidationError {}

/// Opaque user identifier.
///
/// Freshly minted identifiers are UUID v4 strings, but any non-empty,
/// unpadded string is accepted so previously stored records keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Mint a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserIdValidationError> {
        if id.is_empty() {
            return Err(UserIdValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserIdValidationError::PaddedId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

impl std::str::FromStr for UserId {
    type Err = UserIdValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

/// Validated user data without an identity.
///
/// Values are only produced by [`crate::domain::resolve`], so every field
/// except `complement`, `birth_date` and `email_verified` is non-empty, the
/// mobile carries the `+55` country code and the postal code is digits-only.
/// Stored records are loaded as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub(crate) full_name: String,
    pub(crate) document: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) birth_date: Option<NaiveDate>,
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) email_verified: bool,
    pub(crate) mobile: String,
    pub(crate) zip_code: PostalCode,
    pub(crate) address_name: String,
    pub(crate) number: String,
    #[serde(default)]
    pub(crate) complement: String,
    pub(crate) neighborhood: String,
    pub(crate) city: String,
    pub(crate) state: BrazilianState,
}

impl UserDetails {
    /// Full civil name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Document number (CPF), as typed.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Optional birth date.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    /// E-mail address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether the e-mail was marked as pre-verified.
    pub fn email_verified(&self) -> bool {
        self.email_verified
    }

    /// Mobile number as `+55` followed by digits.
    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    /// Digits-only postal code.
    pub fn zip_code(&self) -> &PostalCode {
        &self.zip_code
    }

    /// Street or square name.
    pub fn address_name(&self) -> &str {
        &self.address_name
    }

    /// Building number.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Optional complement; empty when not provided.
    pub fn complement(&self) -> &str {
        &self.complement
    }

    /// Neighbourhood.
    pub fn neighborhood(&self) -> &str {
        &self.neighborhood
    }

    /// Municipality.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Federative unit.
    pub fn state(&self) -> BrazilianState {
        self.state
    }
}

/// Persisted user record.
///
/// ## Invariants
/// - `id` is assigned once on creation and never changes.
/// - Serialised flat: `id` next to the camelCase detail fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    id: UserId,
    #[serde(flatten)]
    details: UserDetails,
}

impl UserRecord {
    /// Pair an identity with validated details.
    pub fn new(id: UserId, details: UserDetails) -> Self {
        Self { id, details }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Validated field values.
    pub fn details(&self) -> &UserDetails {
        &self.details
    }

    /// Split into identity and details.
    pub fn into_parts(self) -> (UserId, UserDetails) {
        (self.id, self.details)
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
