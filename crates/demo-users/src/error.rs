//! Error types for the demo-users crate.

use thiserror::Error;

/// Errors that can occur during user generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// More users were requested than a single batch allows.
    #[error("requested {requested} users but at most {max} can be generated at once")]
    CountTooLarge {
        /// Number of users requested.
        requested: usize,
        /// Largest accepted batch.
        max: usize,
    },

    /// Failed to generate a usable full name after maximum retries.
    #[error("failed to generate a full name after {max_attempts} attempts")]
    NameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// The drawn year and day-of-year do not form a calendar date.
    #[error("day {ordinal} of {year} is not a calendar date")]
    InvalidBirthDate {
        /// Drawn year.
        year: i32,
        /// Drawn day of the year.
        ordinal: u32,
    },
}
