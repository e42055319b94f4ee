use thiserror::Error;

#[derive(Error, Debug)]
pub enum VenueError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Upstream returned status {status} for {endpoint}")]
    UpstreamStatus { status: u16, endpoint: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid venue {id}: {reason}")]
    InvalidVenue { id: i64, reason: String },

    #[error("Undo window has expired")]
    UndoExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VenueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VenueError::ApiError(_) | VenueError::UpstreamStatus { .. } => ErrorCategory::Network,
            VenueError::IoError(_) => ErrorCategory::Storage,
            VenueError::SerializationError(_) | VenueError::InvalidVenue { .. } => {
                ErrorCategory::Data
            }
            VenueError::InvalidConfigValueError { .. }
            | VenueError::MissingConfigError { .. }
            | VenueError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            VenueError::UndoExpired => ErrorCategory::User,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::User => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the venue API endpoint and your network connection, then retry",
            ErrorCategory::Storage => "Check that the storage path exists and is writable",
            ErrorCategory::Configuration => "Review the command-line flags or the TOML configuration file",
            ErrorCategory::Data => "The venue data is malformed; verify the API response format",
            ErrorCategory::User => "The action can no longer be undone",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            VenueError::ApiError(_) | VenueError::UpstreamStatus { .. } => {
                "Could not load venues from the server".to_string()
            }
            VenueError::IoError(e) => format!("Could not access local storage: {}", e),
            VenueError::UndoExpired => "Too late to undo that removal".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VenueError>;
