//! Generated user type.
//!
//! The type is independent of the administration domain so this crate has
//! no dependency on it; callers convert at the point of use.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A generated sample user, formatted the way a person would type it into
/// the form.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use demo_users::DemoUser;
///
/// let user = DemoUser {
///     full_name: "Ana Souza Lima".to_owned(),
///     document: "529.982.247-25".to_owned(),
///     birth_date: NaiveDate::from_ymd_opt(1990, 5, 1).expect("valid date"),
///     email: "ana.lima0@example.com".to_owned(),
///     email_verified: false,
///     mobile: "(11) 98204-9999".to_owned(),
///     zip_code: "01001-000".to_owned(),
///     address_name: "Praça da Sé".to_owned(),
///     number: "100".to_owned(),
///     complement: String::new(),
///     neighborhood: "Sé".to_owned(),
///     city: "São Paulo".to_owned(),
///     state: "SP".to_owned(),
/// };
///
/// assert_eq!(user.state, "SP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoUser {
    /// First name followed by two surnames.
    pub full_name: String,
    /// CPF with the `999.999.999-99` mask.
    pub document: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Address derived from the name.
    pub email: String,
    /// Whether the e-mail is flagged as pre-verified.
    pub email_verified: bool,
    /// Mobile with the `(99) 99999-9999` mask.
    pub mobile: String,
    /// Postal code with the `99999-999` mask.
    pub zip_code: String,
    /// Street or square.
    pub address_name: String,
    /// Building number.
    pub number: String,
    /// Optional complement; empty when absent.
    pub complement: String,
    /// Neighbourhood.
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// Two-letter federative unit code.
    pub state: String,
}
