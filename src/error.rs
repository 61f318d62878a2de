use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlAdapterError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Transaction error: {0}")]
    TransactionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

impl SqlAdapterError {
    /// True for failures raised while opening the connection.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}
