//! Error types for the migration engine.

use gassi_query::QueryError;
use thiserror::Error;

/// Result type alias for migration operations.
pub type MigrateResult<T> = Result<T, MigrationError>;

/// Errors that can occur during migration operations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The bookkeeping table could not be created, read or written.
    #[error("{message}: {source}")]
    Bookkeeping {
        /// What was being attempted.
        message: String,
        /// Underlying database error.
        #[source]
        source: QueryError,
    },

    /// A pending migration has no SQL for the active backend.
    #[error("migration {id} does not support database type: {backend}")]
    MissingDialectBody {
        /// Migration ID.
        id: String,
        /// Backend name.
        backend: String,
    },

    /// A migration body failed and the error was not recognised as
    /// "already exists".
    #[error("migration {id} failed on {backend}: {source}")]
    MigrationFailed {
        /// Migration ID.
        id: String,
        /// Backend name.
        backend: String,
        /// Underlying database error.
        #[source]
        source: QueryError,
    },

    /// Dialect resolution or connection setup failed.
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl MigrationError {
    /// Create a bookkeeping error.
    pub fn bookkeeping(message: impl Into<String>, source: QueryError) -> Self {
        Self::Bookkeeping {
            message: message.into(),
            source,
        }
    }

    /// Create a missing body error.
    pub fn missing_body(id: impl Into<String>, backend: impl Into<String>) -> Self {
        Self::MissingDialectBody {
            id: id.into(),
            backend: backend.into(),
        }
    }

    /// Create a migration failure.
    pub fn failed(id: impl Into<String>, backend: impl Into<String>, source: QueryError) -> Self {
        Self::MigrationFailed {
            id: id.into(),
            backend: backend.into(),
            source,
        }
    }

    /// ID of the migration this error concerns, if any.
    pub fn migration_id(&self) -> Option<&str> {
        match self {
            Self::MissingDialectBody { id, .. } | Self::MigrationFailed { id, .. } => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_body_display() {
        let err = MigrationError::missing_body("002_create_dogs_table", "mysql");
        assert_eq!(
            err.to_string(),
            "migration 002_create_dogs_table does not support database type: mysql"
        );
        assert_eq!(err.migration_id(), Some("002_create_dogs_table"));
    }

    #[test]
    fn test_failed_keeps_source() {
        let err = MigrationError::failed(
            "002_create_dogs_table",
            "sqlite",
            QueryError::database("near \"TABL\": syntax error"),
        );
        let msg = err.to_string();
        assert!(msg.contains("002_create_dogs_table"));
        assert!(msg.contains("syntax error"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_bookkeeping_display() {
        let err = MigrationError::bookkeeping(
            "failed to create schema_migrations table",
            QueryError::connection("refused"),
        );
        assert_eq!(
            err.to_string(),
            "failed to create schema_migrations table: connection error: refused"
        );
        assert_eq!(err.migration_id(), None);
    }
}
