//! Error types shared by the dialects and the driver crates.
//!
//! Driver crates convert their native errors into [`QueryError`] while
//! keeping the backend's message text intact, because the migration
//! runner inspects that text to recognise "already exists" failures.

use thiserror::Error;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur while talking to a database backend.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The backend rejected a statement. Carries the driver's message verbatim.
    #[error("{0}")]
    Database(String),

    /// A connection could not be established or was lost.
    #[error("connection error: {0}")]
    Connection(String),

    /// No dialect is registered under the requested name.
    #[error("unsupported database type: {name} (supported: {supported})")]
    UnsupportedDatabase {
        /// The normalized name that was requested.
        name: String,
        /// Comma separated list of supported backends.
        supported: String,
    },

    /// A primary session setting could not be applied after connecting.
    #[error("failed to set {setting}: {message}")]
    Settings {
        /// Human readable name of the setting (e.g. "timezone").
        setting: &'static str,
        /// The underlying driver message.
        message: String,
    },

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A value could not be converted to or from a backend type.
    #[error("type conversion error: {0}")]
    TypeConversion(String),
}

impl QueryError {
    /// Create a database error.
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a type conversion error.
    pub fn type_conversion(msg: impl Into<String>) -> Self {
        Self::TypeConversion(msg.into())
    }

    /// Wrap a failed session setting.
    pub fn settings(setting: &'static str, source: &QueryError) -> Self {
        Self::Settings {
            setting,
            message: source.to_string(),
        }
    }

    /// Check if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_keeps_driver_text() {
        let err = QueryError::database("Duplicate column name 'photo_thumbnail'");
        assert_eq!(err.to_string(), "Duplicate column name 'photo_thumbnail'");
    }

    #[test]
    fn test_unsupported_display() {
        let err = QueryError::UnsupportedDatabase {
            name: "oracle".to_string(),
            supported: "mysql, postgres, sqlite".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("unsupported database type: oracle"));
        assert!(msg.contains("mysql, postgres, sqlite"));
    }

    #[test]
    fn test_settings_wraps_source() {
        let source = QueryError::database("unknown time zone");
        let err = QueryError::settings("timezone", &source);
        assert_eq!(err.to_string(), "failed to set timezone: unknown time zone");
    }

    #[test]
    fn test_is_connection_error() {
        assert!(QueryError::connection("refused").is_connection_error());
        assert!(!QueryError::database("syntax").is_connection_error());
    }
}
