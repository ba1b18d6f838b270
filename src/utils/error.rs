use thiserror::Error;

/// Message shown to the user when a country-name lookup finds nothing.
pub const NOT_FOUND_MESSAGE: &str = "País no encontrado";

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    StatusError { url: String, status: u16 },

    #[error("No country matches '{query}'")]
    NotFoundError { query: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("'{code}' is not one of the current neighbors")]
    UnknownNeighborError { code: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    NotFound,
    Data,
    Configuration,
    Selection,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LookupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LookupError::ApiError(_) | LookupError::StatusError { .. } => ErrorCategory::Network,
            LookupError::NotFoundError { .. } => ErrorCategory::NotFound,
            LookupError::SerializationError(_) => ErrorCategory::Data,
            LookupError::UrlError(_)
            | LookupError::ConfigError { .. }
            | LookupError::MissingConfigError { .. }
            | LookupError::InvalidConfigValueError { .. }
            | LookupError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            LookupError::UnknownNeighborError { .. } => ErrorCategory::Selection,
            LookupError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound | ErrorCategory::Selection => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// True for failures that mean "the API has no such country", as opposed to transport or
    /// decoding problems.
    pub fn is_not_found(&self) -> bool {
        match self {
            LookupError::NotFoundError { .. } => true,
            LookupError::StatusError { status, .. } => *status == 404,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LookupError::NotFoundError { .. } | LookupError::StatusError { .. } => {
                NOT_FOUND_MESSAGE.to_string()
            }
            LookupError::ApiError(e) if e.is_timeout() => {
                "The country service did not answer in time".to_string()
            }
            LookupError::ApiError(e) if e.is_connect() => {
                "Could not connect to the country service".to_string()
            }
            LookupError::ApiError(_) => "Network error while contacting the country service".to_string(),
            LookupError::SerializationError(_) => {
                "The country service returned an unexpected response".to_string()
            }
            LookupError::UnknownNeighborError { code } => {
                format!("{} is not a neighbor of the current country", code)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your connection or the API base URL and try again",
            ErrorCategory::NotFound => "Check the spelling of the country name",
            ErrorCategory::Data => "The API format may have changed; check the API base URL",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Selection => "Pick one of the listed neighbor codes",
            ErrorCategory::System => "Check file permissions and available resources",
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
