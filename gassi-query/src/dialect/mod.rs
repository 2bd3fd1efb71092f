//! Backend-specific SQL dialects.
//!
//! A [`Dialect`] turns portable schema intents (auto-increment keys, boolean
//! columns, sized text, timestamps, insert-or-ignore, conditional column
//! addition) into the exact SQL text a backend accepts. Dialects are
//! stateless and shared behind an `Arc` handed out by the
//! [`DialectFactory`].
//!
//! ```rust
//! use gassi_query::dialect::DialectFactory;
//!
//! let factory = DialectFactory::new();
//! let dialect = factory.get("postgresql").unwrap();
//!
//! assert_eq!(dialect.name(), "postgres");
//! assert_eq!(dialect.text_type(255), "VARCHAR(255)");
//! assert_eq!(dialect.add_column("dogs", "photo_thumbnail", "TEXT"),
//!     "ALTER TABLE dogs ADD COLUMN IF NOT EXISTS photo_thumbnail TEXT");
//! ```

mod factory;
mod mysql;
mod postgres;
mod sqlite;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{QueryError, QueryResult};
use crate::executor::SqlExecutor;

pub use factory::DialectFactory;
pub use mysql::MysqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

/// Database-specific SQL syntax and session behavior.
#[async_trait]
pub trait Dialect: Send + Sync + std::fmt::Debug {
    /// Canonical backend name (`sqlite`, `mysql`, `postgres`).
    ///
    /// Migration bodies are keyed by this name.
    fn name(&self) -> &'static str;

    /// Primary key column definition with auto-increment.
    fn auto_increment(&self) -> &'static str;

    /// Column type used for booleans.
    fn boolean_type(&self) -> &'static str;

    /// Literal for a boolean value, usable in DEFAULT clauses.
    fn boolean_literal(&self, value: bool) -> &'static str;

    /// Text column type. `max_length == 0` means unbounded.
    fn text_type(&self, max_length: usize) -> String;

    /// Preferred timestamp column type.
    fn timestamp_type(&self) -> &'static str;

    /// Expression evaluating to the current date.
    fn current_date(&self) -> &'static str;

    /// Expression evaluating to the current timestamp.
    fn current_timestamp(&self) -> &'static str;

    /// Placeholder for the 1-indexed parameter `position`.
    ///
    /// Every backend answers `?`: the PostgreSQL connection rewrites `?` into
    /// `$n` itself, so callers never build numbered placeholders.
    fn placeholder(&self, position: usize) -> String;

    /// Whether `ALTER TABLE .. ADD COLUMN IF NOT EXISTS` is supported.
    ///
    /// When false, [`Dialect::add_column`] is not idempotent and callers must
    /// tolerate a duplicate-column error.
    fn supports_if_not_exists_column(&self) -> bool;

    /// Whether `CREATE INDEX IF NOT EXISTS` is supported.
    ///
    /// When false, indexes must be declared inline in `CREATE TABLE`.
    fn supports_if_not_exists_index(&self) -> bool {
        true
    }

    /// Complete INSERT that silently skips rows conflicting with a unique or
    /// primary key.
    fn insert_or_ignore(&self, table: &str, columns: &[&str], placeholders: &str) -> String;

    /// Complete ALTER TABLE statement adding a column.
    fn add_column(&self, table: &str, column: &str, column_type: &str) -> String;

    /// Suffix appended after the closing parenthesis of CREATE TABLE.
    fn table_suffix(&self) -> &'static str;

    /// Quote an identifier with the backend's quote character.
    fn quote_identifier(&self, identifier: &str) -> String;

    /// Apply post-connect session settings (timezone, encoding, strictness).
    ///
    /// A failing primary setting aborts with [`QueryError::Settings`];
    /// secondary settings only log a warning.
    async fn apply_settings(&self, conn: &dyn SqlExecutor) -> QueryResult<()>;

    /// Comma separated placeholders for `count` parameters.
    fn placeholders(&self, count: usize) -> String {
        crate::sql::placeholder_list(count, |i| self.placeholder(i))
    }
}

/// A session-level statement run by [`Dialect::apply_settings`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionSetting {
    /// Name used in errors and logs.
    pub name: &'static str,
    /// Statement to execute.
    pub sql: &'static str,
    /// Whether failure aborts connection setup.
    pub required: bool,
}

impl SessionSetting {
    pub(crate) const fn required(name: &'static str, sql: &'static str) -> Self {
        Self {
            name,
            sql,
            required: true,
        }
    }

    pub(crate) const fn optional(name: &'static str, sql: &'static str) -> Self {
        Self {
            name,
            sql,
            required: false,
        }
    }
}

/// Run `settings` in order against `conn`.
pub(crate) async fn apply_session_settings(
    backend: &'static str,
    conn: &dyn SqlExecutor,
    settings: &[SessionSetting],
) -> QueryResult<()> {
    for setting in settings {
        debug!(backend, setting = setting.name, sql = setting.sql, "Applying session setting");
        if let Err(e) = conn.execute_batch(setting.sql).await {
            if setting.required {
                return Err(QueryError::settings(setting.name, &e));
            }
            warn!(backend, setting = setting.name, error = %e, "Failed to apply session setting");
        }
    }
    Ok(())
}
