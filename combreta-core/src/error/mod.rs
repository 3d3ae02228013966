//! Core error types for Combreta

use thiserror::Error;

/// Main error type for Combreta operations
#[derive(Error, Debug)]
pub enum CombretaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias for Combreta operations
pub type CombretaResult<T> = Result<T, CombretaError>;

impl From<serde_json::Error> for CombretaError {
    fn from(err: serde_json::Error) -> Self {
        CombretaError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for CombretaError {
    fn from(err: toml::de::Error) -> Self {
        CombretaError::Configuration(err.to_string())
    }
}

impl CombretaError {
    /// Process exit code used by the command-line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            CombretaError::Configuration(_) => 2,
            CombretaError::Io(_) | CombretaError::NotFound(_) => 3,
            CombretaError::Parse(_) | CombretaError::InvalidInput(_) => 4,
            CombretaError::Network(_) => 5,
            CombretaError::Other(_) => 1,
        }
    }
}
