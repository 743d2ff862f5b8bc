use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
}

impl From<crate::errors::ServerError> for SourceError {
    fn from(err: crate::errors::ServerError) -> Self {
        SourceError::Database(err.to_string())
    }
}
