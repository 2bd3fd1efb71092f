//! PostgreSQL dialect.

use async_trait::async_trait;

use super::{Dialect, SessionSetting, apply_session_settings};
use crate::error::QueryResult;
use crate::executor::SqlExecutor;
use crate::sql::escape_identifier;

const SETTINGS: &[SessionSetting] = &[
    SessionSetting::required("timezone", "SET TIME ZONE 'UTC'"),
    SessionSetting::required("encoding", "SET client_encoding = 'UTF8'"),
    SessionSetting::optional("datestyle", "SET datestyle = 'ISO, YMD'"),
];

/// PostgreSQL dialect (12+).
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Create the dialect.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn auto_increment(&self) -> &'static str {
        "SERIAL PRIMARY KEY"
    }

    fn boolean_type(&self) -> &'static str {
        "BOOLEAN"
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn text_type(&self, max_length: usize) -> String {
        if max_length == 0 {
            "TEXT".to_string()
        } else {
            format!("VARCHAR({})", max_length)
        }
    }

    fn timestamp_type(&self) -> &'static str {
        "TIMESTAMP WITH TIME ZONE"
    }

    fn current_date(&self) -> &'static str {
        "CURRENT_DATE"
    }

    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    /// Always `?`; `gassi-postgres` numbers them when preparing.
    fn placeholder(&self, _position: usize) -> String {
        "?".to_string()
    }

    fn supports_if_not_exists_column(&self) -> bool {
        true
    }

    fn insert_or_ignore(&self, table: &str, columns: &[&str], placeholders: &str) -> String {
        // Without a conflict target this relies on a primary key or unique constraint.
        format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT DO NOTHING",
            table,
            columns.join(", "),
            placeholders
        )
    }

    fn add_column(&self, table: &str, column: &str, column_type: &str) -> String {
        format!(
            "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}",
            table, column, column_type
        )
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
