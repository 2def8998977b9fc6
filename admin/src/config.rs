//! Console configuration loaded via OrthoConfig.
//!
//! Values come from `USER_ADMIN_*` environment variables or configuration
//! files. Optional fields fall back to a documented default in their
//! accessor; numeric fields carry their default in the derive so an empty
//! environment still loads.

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{PageSize, UnsupportedPageSize};
use crate::outbound::viacep::DEFAULT_VIACEP_BASE_URL;

const DEFAULT_STORAGE_DIR: &str = ".user-admin";

/// Settings for the administration console.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_ADMIN")]
pub struct AdminSettings {
    /// Directory holding the device-local store.
    pub storage_dir: Option<String>,
    /// Base URL of the ViaCEP-compatible postal-code directory.
    pub lookup_base_url: Option<String>,
    /// Bound on one postal lookup, in milliseconds.
    #[ortho_config(default = 5000)]
    pub lookup_timeout_ms: u64,
    /// Rows per grid page.
    #[ortho_config(default = 10)]
    pub page_size: usize,
}

impl AdminSettings {
    /// Return the storage directory, falling back to `.user-admin`.
    pub fn storage_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.storage_dir.as_deref().unwrap_or(DEFAULT_STORAGE_DIR))
    }

    /// Return the postal directory base URL, falling back to ViaCEP.
    ///
    /// # Errors
    ///
    /// Returns the parse error for a malformed override.
    pub fn lookup_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(
            self.lookup_base_url
                .as_deref()
                .unwrap_or(DEFAULT_VIACEP_BASE_URL),
        )
    }

    /// Return the lookup timeout; five seconds unless overridden.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    /// Return the grid page size; ten rows unless overridden.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedPageSize`] when the value is not an offered size.
    pub fn page_size(&self) -> Result<PageSize, UnsupportedPageSize> {
        PageSize::try_from(self.page_size)
    }
}
