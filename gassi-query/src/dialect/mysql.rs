//! MySQL dialect.

use async_trait::async_trait;

use super::{Dialect, SessionSetting, apply_session_settings};
use crate::error::QueryResult;
use crate::executor::SqlExecutor;
use crate::sql::escape_identifier;

const SETTINGS: &[SessionSetting] = &[
    SessionSetting::required("charset", "SET NAMES utf8mb4"),
    SessionSetting::required("timezone", "SET time_zone = '+00:00'"),
    // Some server versions reject individual modes.
    SessionSetting::optional("SQL mode", "SET sql_mode = 'TRADITIONAL'"),
];

/// MySQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Create the dialect.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn auto_increment(&self) -> &'static str {
        "INT AUTO_INCREMENT PRIMARY KEY"
    }

    fn boolean_type(&self) -> &'static str {
        "TINYINT(1)"
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn text_type(&self, max_length: usize) -> String {
        if max_length == 0 {
            "TEXT".to_string()
        } else {
            // Indexed columns need an explicit size.
            format!("VARCHAR({})", max_length)
        }
    }

    fn timestamp_type(&self) -> &'static str {
        "DATETIME"
    }

    fn current_date(&self) -> &'static str {
        "CURDATE()"
    }

    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    fn placeholder(&self, _position: usize) -> String {
        "?".to_string()
    }

    // 8.0.29 added the syntax; older servers are still supported.
    fn supports_if_not_exists_column(&self) -> bool {
        false
    }

    fn supports_if_not_exists_index(&self) -> bool {
        false
    }

    fn insert_or_ignore(&self, table: &str, columns: &[&str], placeholders: &str) -> String {
        format!(
            "INSERT IGNORE INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders
        )
    }

    fn add_column(&self, table: &str, column: &str, column_type: &str) -> String {
        format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_type)
    }

    fn table_suffix(&self) -> &'static str {
        " ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci"
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        escape_identifier(identifier, '`')
    }

    async fn apply_settings(&self, conn: &dyn SqlExecutor) -> QueryResult<()> {
        apply_session_settings(self.name(), conn, SETTINGS).await
    }
}
