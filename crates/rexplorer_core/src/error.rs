use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("Value is not valid UTF-8: {0}")]
    Decode(String),

    #[error("Value is not valid JSON: {0}")]
    Parse(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExplorerError {
    pub fn query_failed(message: impl Into<String>) -> Self {
        Self::QueryFailed(message.into())
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    /// Errors caused by the stored data rather than by the store itself.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Decode(_) | Self::Parse(_))
    }
}
