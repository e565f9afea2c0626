//! Error types for bday.

use thiserror::Error;

/// Errors that can occur in bday operations.
#[derive(Error, Debug)]
pub enum BdayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Cannot delete group '{group}'. It is associated with {count} birthday(s)")]
    GroupInUse { group: String, count: usize },

    #[error("{0} is not supported by this backend")]
    Unsupported(&'static str),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BdayError {
    /// Validation and referential failures are the user's to fix;
    /// everything else is a storage or network failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            BdayError::Validation(_)
                | BdayError::InvalidDate(_)
                | BdayError::NotFound { .. }
                | BdayError::GroupInUse { .. }
        )
    }
}

impl From<serde_json::Error> for BdayError {
    fn from(err: serde_json::Error) -> Self {
        BdayError::Serialization(err.to_string())
    }
}

/// Result type alias for bday operations.
pub type BdayResult<T> = Result<T, BdayError>;
