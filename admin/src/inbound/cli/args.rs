//! Command-line surface of the `user-admin` console.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::BrazilianState;

/// Default seed for `seed`.
pub const DEFAULT_DEMO_SEED: u64 = 2026;
/// Default number of users created by `seed`.
pub const DEFAULT_DEMO_COUNT: usize = 12;

/// `user-admin` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "user-admin",
    about = "Manage user records with Brazilian postal-code autofill",
    version
)]
pub struct Cli {
    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Console actions.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show one page of the user grid.
    List {
        /// Zero-based page index.
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Rows per page: 10, 15, 25, 50 or 100.
        #[arg(long = "page-size", value_name = "rows")]
        page_size: Option<usize>,
    },
    /// Print every field of one record.
    Show {
        /// Record identity.
        id: String,
    },
    /// Resolve a postal code without touching the store.
    Lookup {
        /// Postal code, masked or digits only.
        postal_code: String,
    },
    /// Fill a new form and submit it.
    Create(UserFieldArgs),
    /// Open an existing record, apply the given fields and submit.
    Edit {
        /// Record identity.
        id: String,
        /// Fields to change.
        #[command(flatten)]
        fields: UserFieldArgs,
    },
    /// Delete one record.
    Delete {
        /// Record identity.
        id: String,
    },
    /// Add generated sample users to the store.
    Seed {
        /// RNG seed; the same seed always yields the same users.
        #[arg(long, default_value_t = DEFAULT_DEMO_SEED)]
        seed: u64,
        /// Number of users to add.
        #[arg(long, default_value_t = DEFAULT_DEMO_COUNT)]
        count: usize,
    },
}

/// Form fields accepted by `create` and `edit`; absent flags leave the field
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct UserFieldArgs {
    /// Nome Completo.
    #[arg(long = "full-name")]
    pub full_name: Option<String>,
    /// CPF.
    #[arg(long)]
    pub document: Option<String>,
    /// Data de Nascimento, as `YYYY-MM-DD`.
    #[arg(long = "birth-date", value_name = "YYYY-MM-DD")]
    pub birth_date: Option<NaiveDate>,
    /// E-mail.
    #[arg(long)]
    pub email: Option<String>,
    /// Email Pré-verificado.
    #[arg(long = "email-verified", value_name = "true|false")]
    pub email_verified: Option<bool>,
    /// Celular.
    #[arg(long)]
    pub mobile: Option<String>,
    /// CEP; triggers the postal lookup.
    #[arg(long = "zip-code")]
    pub zip_code: Option<String>,
    /// Endereço; ignored when the lookup filled it.
    #[arg(long = "address-name")]
    pub address_name: Option<String>,
    /// Número.
    #[arg(long)]
    pub number: Option<String>,
    /// Complemento.
    #[arg(long)]
    pub complement: Option<String>,
    /// Bairro; ignored when the lookup filled it.
    #[arg(long)]
    pub neighborhood: Option<String>,
    /// Cidade; ignored when the lookup filled it.
    #[arg(long)]
    pub city: Option<String>,
    /// Estado (two-letter code); ignored when the lookup filled it.
    #[arg(long)]
    pub state: Option<BrazilianState>,
}
