//! Error types for MySQL operations.

use gassi_query::error::QueryError;
use thiserror::Error;

/// Result type for MySQL operations.
pub type MysqlResult<T> = Result<T, MysqlError>;

/// Error type for MySQL operations.
#[derive(Debug, Error)]
pub enum MysqlError {
    /// MySQL driver error.
    #[error("MySQL error: {0}")]
    Mysql(#[from] mysql_async::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Type conversion error.
    #[error("Type conversion error: {0}")]
    TypeConversion(String),
}

impl MysqlError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a type conversion error.
    pub fn type_conversion(msg: impl Into<String>) -> Self {
        Self::TypeConversion(msg.into())
    }
}

impl From<MysqlError> for QueryError {
    fn from(err: MysqlError) -> Self {
        match err {
            MysqlError::Mysql(mysql_async::Error::Io(e)) => QueryError::connection(e.to_string()),
            // "ERROR 1060 (42S21): Duplicate column name 'x'" is kept whole.
            MysqlError::Mysql(e) => QueryError::database(e.to_string()),
            MysqlError::Config(msg) => QueryError::config(msg),
            MysqlError::TypeConversion(msg) => QueryError::type_conversion(msg),
        }
    }
}
