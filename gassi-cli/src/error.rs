//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

use gassi_migrate::MigrationError;
use gassi_query::QueryError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(gassi::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(gassi::config),
        help("set --database-type/--database-url, DB_TYPE/DATABASE_URL or gassi.toml")
    )]
    Config(String),

    /// Connection or session setup error
    #[error("Database error: {0}")]
    #[diagnostic(code(gassi::database))]
    Database(String),

    /// Migration error
    #[error("Migration error: {0}")]
    #[diagnostic(code(gassi::migration))]
    Migration(#[from] MigrationError),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}

impl From<QueryError> for CliError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::UnsupportedDatabase { .. } | QueryError::Config(_) => {
                CliError::Config(err.to_string())
            }
            other => CliError::Database(other.to_string()),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<gassi_sqlite::SqliteError> for CliError {
    fn from(err: gassi_sqlite::SqliteError) -> Self {
        QueryError::from(err).into()
    }
}

#[cfg(feature = "mysql")]
impl From<gassi_mysql::MysqlError> for CliError {
    fn from(err: gassi_mysql::MysqlError) -> Self {
        QueryError::from(err).into()
    }
}

#[cfg(feature = "postgres")]
impl From<gassi_postgres::PgError> for CliError {
    fn from(err: gassi_postgres::PgError) -> Self {
        QueryError::from(err).into()
    }
}
