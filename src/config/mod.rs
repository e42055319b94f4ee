#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, SortArg};
pub use toml_config::TomlConfig;

use crate::utils::error::Result;
use crate::utils::validation;

pub const DEFAULT_STORAGE_PATH: &str = "./.venuego";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_UNDO_WINDOW_MS: u64 = 5_000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Checks shared by every configuration source.
pub(crate) fn validate_common(
    api_endpoint: Option<&str>,
    storage_path: &str,
    favourites_key: &str,
    debounce_ms: u64,
    undo_window_ms: u64,
    timeout_seconds: u64,
) -> Result<()> {
    let endpoint = validation::validate_required_field("api_endpoint", &api_endpoint)?;
    validation::validate_url("api_endpoint", endpoint)?;
    validation::validate_path("storage_path", storage_path)?;
    validation::validate_storage_key("favourites_key", favourites_key)?;
    validation::validate_range("debounce_ms", debounce_ms, 0, 10_000)?;
    validation::validate_range("undo_window_ms", undo_window_ms, 0, 60_000)?;
    validation::validate_range("timeout_seconds", timeout_seconds, 1, 300)?;
    Ok(())
}
