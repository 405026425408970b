use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Background worker error: {message}")]
    WorkerError { message: String },
}

impl DirectoryError {
    /// True for failures that a cached snapshot can stand in for. A body
    /// that arrived but did not decode is not one of them.
    pub fn is_network(&self) -> bool {
        match self {
            DirectoryError::ApiError(e) => !e.is_decode(),
            DirectoryError::HttpStatusError { .. } => true,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::ApiError(_) | DirectoryError::HttpStatusError { .. } => {
                "Could not reach the restaurant API and no cached data is available".to_string()
            }
            DirectoryError::IoError(e) => format!("File access failed: {}", e),
            DirectoryError::SerializationError(_) => {
                "Restaurant data could not be read".to_string()
            }
            DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. }
            | DirectoryError::ConfigValidationError { .. } => {
                format!("Invalid configuration: {}", self)
            }
            DirectoryError::WorkerError { message } => {
                format!("Background refresh failed: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DirectoryError::ApiError(_) | DirectoryError::HttpStatusError { .. } => {
                "Check that the API server is running and --api-endpoint points at it"
            }
            DirectoryError::IoError(_) => "Check permissions on the cache and output directories",
            DirectoryError::SerializationError(_) => {
                "Check that --api-endpoint serves a restaurant array, or delete the cache directory"
            }
            DirectoryError::InvalidConfigValueError { .. }
            | DirectoryError::MissingConfigError { .. }
            | DirectoryError::ConfigValidationError { .. } => {
                "Run with --help to see the accepted options"
            }
            DirectoryError::WorkerError { .. } => "Disable background refresh or raise the interval",
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
