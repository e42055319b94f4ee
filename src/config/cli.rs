use crate::config::{
    validate_common, DEFAULT_DEBOUNCE_MS, DEFAULT_STORAGE_PATH, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_UNDO_WINDOW_MS,
};
use crate::core::favourites::DEFAULT_FAVOURITES_KEY;
use crate::core::{ConfigProvider, SortOrder};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "venuego")]
#[command(about = "Sport venues near you, from the terminal")]
pub struct CliConfig {
    #[arg(long, env = "VENUEGO_API_URL", global = true)]
    pub api_endpoint: Option<String>,

    #[arg(long, default_value = DEFAULT_STORAGE_PATH, global = true)]
    pub storage_path: String,

    #[arg(long, default_value = DEFAULT_FAVOURITES_KEY, global = true)]
    pub favourites_key: String,

    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS, global = true)]
    pub debounce_ms: u64,

    #[arg(long, default_value_t = DEFAULT_UNDO_WINDOW_MS, global = true)]
    pub undo_window_ms: u64,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS, global = true)]
    pub timeout_seconds: u64,

    #[arg(long, global = true, help = "Read settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// List venues, optionally filtered and sorted by distance
    List {
        #[arg(short, long, default_value = "")]
        query: String,

        #[arg(short, long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Add a venue to favourites, or remove it if already there
    Favourite { id: i64 },
    /// Remove the most recently added favourite
    RemoveLast,
    /// Show favourite venues, most recently added first
    Favourites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SortArg {
    Asc,
    Desc,
}

impl From<Option<SortArg>> for SortOrder {
    fn from(arg: Option<SortArg>) -> Self {
        match arg {
            None => SortOrder::None,
            Some(SortArg::Asc) => SortOrder::Ascending,
            Some(SortArg::Desc) => SortOrder::Descending,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        self.api_endpoint.as_deref().unwrap_or_default()
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn favourites_key(&self) -> &str {
        &self.favourites_key
    }

    fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    fn undo_window(&self) -> Duration {
        Duration::from_millis(self.undo_window_ms)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_common(
            self.api_endpoint.as_deref(),
            &self.storage_path,
            &self.favourites_key,
            self.debounce_ms,
            self.undo_window_ms,
            self.timeout_seconds,
        )
    }
}
