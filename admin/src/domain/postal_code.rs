//! Brazilian postal codes (CEP) and the address fragments they resolve to.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::BrazilianState;

/// Number of digits in a complete CEP.
pub const POSTAL_CODE_DIGITS: usize = 8;

/// Return `raw` with every non-digit character removed.
///
/// # Examples
/// ```
/// use user_admin::domain::digits_only;
///
/// assert_eq!(digits_only("01001-000"), "01001000");
/// assert_eq!(digits_only("(11) 98204-9999"), "11982049999");
/// ```
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Digits-only postal code.
///
/// Construction strips every non-digit; the value may be empty when the
/// input held no digits at all. Length is not enforced: the lookup service
/// decides whether a code exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Normalise `raw` into a digits-only postal code.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(digits_only(raw.as_ref()))
    }

    /// Digits of the code.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether no digits were present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render with the `99999-999` mask when the code is complete.
    ///
    /// # Examples
    /// ```
    /// use user_admin::domain::PostalCode;
    ///
    /// assert_eq!(PostalCode::new("01001000").masked(), "01001-000");
    /// assert_eq!(PostalCode::new("0100").masked(), "0100");
    /// ```
    pub fn masked(&self) -> String {
        match (self.0.len() == POSTAL_CODE_DIGITS, self.0.split_at_checked(5)) {
            (true, Some((head, tail))) => format!("{head}-{tail}"),
            _ => self.0.clone(),
        }
    }
}

impl From<String> for PostalCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<PostalCode> for String {
    fn from(value: PostalCode) -> Self {
        value.0
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical address fragment returned by a successful postal-code lookup.
///
/// Ephemeral: it lives for one lookup and its application to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressLookupResult {
    /// Postal code as echoed by the directory service.
    pub postal_code: PostalCode,
    /// Street or square name.
    pub address_name: String,
    /// Neighbourhood (bairro).
    pub neighborhood: String,
    /// Municipality.
    pub city: String,
    /// Federative unit.
    pub state: BrazilianState,
}
