//! SQLite dialect.

use async_trait::async_trait;

use super::{Dialect, SessionSetting, apply_session_settings};
use crate::error::QueryResult;
use crate::executor::SqlExecutor;
use crate::sql::escape_identifier;

const SETTINGS: &[SessionSetting] = &[SessionSetting::required(
    "foreign keys",
    "PRAGMA foreign_keys = ON",
)];

/// SQLite dialect.
///
/// SQLite has no storage-level distinction between bounded and unbounded
/// text, stores booleans as 0/1 integers and (before 3.35) has no
/// `ADD COLUMN IF NOT EXISTS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Create the dialect.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn auto_increment(&self) -> &'static str {
        "INTEGER PRIMARY KEY AUTOINCREMENT"
    }

    fn boolean_type(&self) -> &'static str {
        "INTEGER"
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn text_type(&self, _max_length: usize) -> String {
        "TEXT".to_string()
    }

    fn timestamp_type(&self) -> &'static str {
        "TIMESTAMP"
    }

    fn current_date(&self) -> &'static str {
        "date('now')"
    }

    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    fn placeholder(&self, _position: usize) -> String {
        "?".to_string()
    }

    fn supports_if_not_exists_column(&self) -> bool {
        false
    }

    fn insert_or_ignore(&self, table: &str, columns: &[&str], placeholders: &str) -> String {
        format!(
            "INSERT OR IGNORE INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders
        )
    }

    fn add_column(&self, table: &str, column: &str, column_type: &str) -> String {
        format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_type)
    }

    fn table_suffix(&self) -> &'static str {
        ""
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        escape_identifier(identifier, '"')
    }

    async fn apply_settings(&self, conn: &dyn SqlExecutor) -> QueryResult<()> {
        apply_session_settings(self.name(), conn, SETTINGS).await
    }
}
