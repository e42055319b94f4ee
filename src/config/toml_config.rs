use crate::config::{
    validate_common, DEFAULT_DEBOUNCE_MS, DEFAULT_STORAGE_PATH, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_UNDO_WINDOW_MS,
};
use crate::core::favourites::DEFAULT_FAVOURITES_KEY;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, VenueError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    pub path: Option<String>,
    pub favourites_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BrowseConfig {
    pub debounce_ms: Option<u64>,
    pub undo_window_ms: Option<u64>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VenueError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| VenueError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${NAME}` with the environment variable's value. Unset
    /// variables are left as written so validation reports them.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn debounce_ms(&self) -> u64 {
        self.browse.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)
    }

    fn undo_window_ms(&self) -> u64 {
        self.browse.undo_window_ms.unwrap_or(DEFAULT_UNDO_WINDOW_MS)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn storage_path(&self) -> &str {
        self.storage.path.as_deref().unwrap_or(DEFAULT_STORAGE_PATH)
    }

    fn favourites_key(&self) -> &str {
        self.storage
            .favourites_key
            .as_deref()
            .unwrap_or(DEFAULT_FAVOURITES_KEY)
    }

    fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms())
    }

    fn undo_window(&self) -> Duration {
        Duration::from_millis(self.undo_window_ms())
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_common(
            Some(self.source.endpoint.as_str()),
            self.storage_path(),
            self.favourites_key(),
            self.debounce_ms(),
            self.undo_window_ms(),
            self.timeout_seconds(),
        )
    }
}
