//! Brazilian federative units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not one of the 27 federative unit codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a Brazilian state code")]
pub struct UnknownStateCode {
    /// Input that failed to parse.
    pub value: String,
}

macro_rules! brazilian_states {
    ($($variant:ident => $code:literal, $name:literal;)*) => {
        /// One of the 26 Brazilian states or the Federal District.
        ///
        /// Serialised as the upper-case two-letter code (`"SP"`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum BrazilianState {
            $(
                #[doc = $name]
                $variant,
            )*
        }

        impl BrazilianState {
            /// Every federative unit, in the order the form's select lists them.
            pub const ALL: [Self; 27] = [$(Self::$variant),*];

            /// Two-letter upper-case code.
            pub const fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            /// Portuguese display name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

brazilian_states! {
    Ac => "AC", "Acre";
    Al => "AL", "Alagoas";
    Ap => "AP", "Amapá";
    Am => "AM", "Amazonas";
    Ba => "BA", "Bahia";
    Ce => "CE", "Ceará";
    Es => "ES", "Espírito Santo";
    Df => "DF", "Distrito Federal";
    Go => "GO", "Goiás";
    Ma => "MA", "Maranhão";
    Mt => "MT", "Mato Grosso";
    Ms => "MS", "Mato Grosso do Sul";
    Mg => "MG", "Minas Gerais";
    Pa => "PA", "Pará";
    Pb => "PB", "Paraíba";
    Pr => "PR", "Paraná";
    Pe => "PE", "Pernambuco";
    Pi => "PI", "Piauí";
    Rj => "RJ", "Rio de Janeiro";
    Rn => "RN", "Rio Grande do Norte";
    Rs => "RS", "Rio Grande do Sul";
    Ro => "RO", "Rondônia";
    Rr => "RR", "Roraima";
    Sc => "SC", "Santa Catarina";
    Sp => "SP", "São Paulo";
    Se => "SE", "Sergipe";
    To => "TO", "Tocantins";
}

impl FromStr for BrazilianState {
    type Err = UnknownStateCode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let code = value.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownStateCode {
                value: value.to_owned(),
            })
    }
}

impl TryFrom<String> for BrazilianState {
    type Error = UnknownStateCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BrazilianState> for String {
    fn from(value: BrazilianState) -> Self {
        value.code().to_owned()
    }
}

impl fmt::Display for BrazilianState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
