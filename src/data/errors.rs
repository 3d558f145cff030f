use thiserror::Error;

/// Error types for provider and data-model operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("API error: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Incorrect date format {0:?}, should be YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid category {category:?}. Valid categories include: {valid}")]
    InvalidCategory { category: String, valid: String },

    #[error("Timeout error: {operation} took longer than {timeout_seconds}s")]
    Timeout {
        operation: String,
        timeout_seconds: u64,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for data operations
pub type DataResult<T> = Result<T, DataError>;

impl DataError {
    /// Precondition violations are caller bugs: surfaced, never treated as an empty payload
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            DataError::InvalidSymbol(_)
                | DataError::InvalidDate(_)
                | DataError::InvalidCategory { .. }
        )
    }

    /// Create a parse error with context
    pub fn parse_error<S: Into<String>>(message: S) -> Self {
        DataError::Parse {
            message: message.into(),
        }
    }

    /// Create an API error with status code
    pub fn api_error<S: Into<String>>(status_code: u16, message: S) -> Self {
        DataError::Api {
            status_code,
            message: message.into(),
        }
    }

    pub fn invalid_category(category: &str, valid: &[&str]) -> Self {
        DataError::InvalidCategory {
            category: category.to_string(),
            valid: valid.join(", "),
        }
    }
}
