use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Remote request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Remote endpoint returned status {status}")]
    RemoteStatusError { status: u16 },

    #[error("Unexpected remote payload: {message}")]
    RemotePayloadError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Stored value for '{key}' is unreadable: {message}")]
    PersistenceReadError { key: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Network,
    Persistence,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuoteError {
    pub fn validation(message: impl Into<String>) -> Self {
        QuoteError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            QuoteError::ValidationError { .. } => ErrorCategory::Validation,
            QuoteError::NetworkError(_)
            | QuoteError::RemoteStatusError { .. }
            | QuoteError::RemotePayloadError { .. } => ErrorCategory::Network,
            QuoteError::PersistenceReadError { .. } | QuoteError::SerializationError(_) => {
                ErrorCategory::Persistence
            }
            QuoteError::ConfigError { .. }
            | QuoteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            QuoteError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 可在本地恢復，集合保持不變
            ErrorCategory::Validation | ErrorCategory::Persistence => ErrorSeverity::Low,
            // 下一個同步週期會再試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuoteError::ValidationError { message } => message.clone(),
            QuoteError::NetworkError(_) | QuoteError::RemoteStatusError { .. } => {
                "Could not reach the quote server".to_string()
            }
            QuoteError::RemotePayloadError { .. } => {
                "The quote server sent data in an unexpected format".to_string()
            }
            QuoteError::PersistenceReadError { .. } | QuoteError::SerializationError(_) => {
                "Saved quotes could not be read".to_string()
            }
            QuoteError::IoError(e) => format!("File operation failed: {}", e),
            QuoteError::ConfigError { message } => format!("Configuration problem: {}", message),
            QuoteError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Check the input and try again",
            ErrorCategory::Network => {
                "Check your connection; the next sync cycle will try again"
            }
            ErrorCategory::Persistence => "The built-in quotes were loaded instead",
            ErrorCategory::Configuration => {
                "Review the command-line flags and the TOML config file"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
