//! Deterministic Brazilian sample user generation for demonstration purposes.
//!
//! This crate produces believable, reproducible user records from a numeric
//! seed. It is independent of the administration domain types; records come
//! out formatted the way a person would type them into the form, so they go
//! through the same validation as manual input.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Deterministic generation from a `u64` seed
//! - Portuguese names via `fake`
//! - CPF numbers with valid check digits
//! - Addresses drawn from real postal codes
//!
//! # Example
//!
//! ```
//! use demo_users::{generate_demo_users, is_valid_cpf};
//!
//! let users = generate_demo_users(42, 3).expect("generation succeeds");
//!
//! assert_eq!(users.len(), 3);
//! assert!(users.iter().all(|user| is_valid_cpf(&user.document)));
//! ```

mod addresses;
mod cpf;
mod error;
mod generator;
mod user;

pub use addresses::{SAMPLE_ADDRESSES, SampleAddress};
pub use cpf::{CPF_DIGITS, cpf_check_digits, format_cpf, is_valid_cpf};
pub use error::GenerationError;
pub use generator::{MAX_DEMO_USERS, generate_demo_users};
pub use user::DemoUser;
