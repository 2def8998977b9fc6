//! `user-admin` entry-point: loads settings, wires the ViaCEP client and the
//! device-local store, and runs one console command.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use user_admin::config::AdminSettings;
use user_admin::domain::{LocalUserStore, PostalLookupClient};
use user_admin::inbound::cli::{Cli, CommandStatus, ConsoleContext};
use user_admin::outbound::storage::DirKeyValueStorage;
use user_admin::outbound::viacep::ViaCepHttpSource;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = AdminSettings::load_from_iter([OsString::from("user-admin")])
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;

    let storage_dir = settings.storage_dir();
    let storage = DirKeyValueStorage::open(&storage_dir)
        .with_context(|| format!("failed to open storage at {storage_dir}"))?;
    let store = Arc::new(LocalUserStore::new(Arc::new(storage)));

    let base_url = settings
        .lookup_base_url()
        .wrap_err("invalid postal lookup base URL")?;
    let timeout = settings.lookup_timeout();
    let source = ViaCepHttpSource::new(base_url, timeout)
        .wrap_err("failed to build the postal lookup client")?;
    let client = PostalLookupClient::with_timeout(Arc::new(source), timeout);

    let page_size = settings.page_size()?;
    let context = ConsoleContext::new(client, store, Arc::new(DefaultClock), page_size);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build the console runtime")?;
    let mut out = io::stdout().lock();
    let status = runtime.block_on(context.run(cli.command, &mut out))?;
    out.flush().wrap_err("failed to flush output")?;

    Ok(match status {
        CommandStatus::Success => ExitCode::SUCCESS,
        CommandStatus::Rejected => ExitCode::FAILURE,
    })
}
