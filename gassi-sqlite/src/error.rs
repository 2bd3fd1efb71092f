//! Error types for SQLite operations.

use gassi_query::error::QueryError;
use thiserror::Error;

/// Result type for SQLite operations.
pub type SqliteResult<T> = Result<T, SqliteError>;

/// Error type for SQLite operations.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite driver error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] tokio_rusqlite::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),
}

impl SqliteError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }
}

impl From<rusqlite::Error> for SqliteError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(tokio_rusqlite::Error::Rusqlite(err))
    }
}

impl From<SqliteError> for QueryError {
    fn from(err: SqliteError) -> Self {
        match err {
            // The engine's message (e.g. "duplicate column name: x") must survive as-is.
            SqliteError::Sqlite(tokio_rusqlite::Error::Rusqlite(e)) => {
                QueryError::database(e.to_string())
            }
            SqliteError::Sqlite(tokio_rusqlite::Error::ConnectionClosed) => {
                QueryError::connection("connection closed")
            }
            SqliteError::Sqlite(e) => QueryError::database(e.to_string()),
            SqliteError::Config(msg) => QueryError::config(msg),
            SqliteError::Connection(msg) => QueryError::connection(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SqliteError::config("invalid path");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("invalid path"));
    }

    #[test]
    fn test_conversion_keeps_engine_text() {
        let inner = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("duplicate column name: photo_thumbnail".to_string()),
        );
        let err: QueryError = SqliteError::from(inner).into();
        assert_eq!(err.to_string(), "duplicate column name: photo_thumbnail");
    }

    #[test]
    fn test_conversion_of_closed_connection() {
        let err: QueryError = SqliteError::Sqlite(tokio_rusqlite::Error::ConnectionClosed).into();
        assert!(err.is_connection_error());
    }
}
