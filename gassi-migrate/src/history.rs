//! Bookkeeping table recording which migrations have been applied.

use std::collections::HashSet;

use chrono::Utc;
use gassi_query::{Dialect, SqlExecutor, SqlValue};
use tracing::{debug, warn};

use crate::error::{MigrateResult, MigrationError};

/// Default name of the bookkeeping table.
pub const DEFAULT_TABLE_NAME: &str = "schema_migrations";

/// Default name of the index on the version column.
pub const DEFAULT_INDEX_NAME: &str = "idx_schema_migrations_version";

/// Width of the version column.
const VERSION_LENGTH: usize = 255;

/// The `schema_migrations(version, applied_at)` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationHistory {
    table_name: String,
    index_name: String,
    unique_versions: bool,
}

impl Default for MigrationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_NAME, DEFAULT_INDEX_NAME, false)
    }
}

impl MigrationHistory {
    /// Describe a bookkeeping table.
    pub fn new(
        table_name: impl Into<String>,
        index_name: impl Into<String>,
        unique_versions: bool,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            index_name: index_name.into(),
            unique_versions,
        }
    }

    /// Table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for `dialect`.
    ///
    /// Dialects without `CREATE INDEX IF NOT EXISTS` get the version index
    /// declared inline.
    pub fn create_table_sql(&self, dialect: &dyn Dialect) -> String {
        let inline_index = if dialect.supports_if_not_exists_index() {
            String::new()
        } else {
            format!(
                ", {} {} (version)",
                if self.unique_versions { "UNIQUE KEY" } else { "INDEX" },
                self.index_name,
            )
        };

        format!(
            "CREATE TABLE IF NOT EXISTS {} (version {} NOT NULL, applied_at {} DEFAULT {}{}){}",
            self.table_name,
            dialect.text_type(VERSION_LENGTH),
            dialect.timestamp_type(),
            dialect.current_timestamp(),
            inline_index,
            dialect.table_suffix(),
        )
    }

    /// `CREATE INDEX IF NOT EXISTS` statement on the version column, or
    /// `None` when `dialect` declares it inline.
    pub fn create_index_sql(&self, dialect: &dyn Dialect) -> Option<String> {
        dialect.supports_if_not_exists_index().then(|| {
            format!(
                "CREATE {}INDEX IF NOT EXISTS {} ON {}(version)",
                if self.unique_versions { "UNIQUE " } else { "" },
                self.index_name,
                self.table_name,
            )
        })
    }

    /// Create the table and its index.
    ///
    /// A failing plain index only logs a warning; a failing unique index is
    /// a bookkeeping error.
    pub async fn ensure(&self, conn: &dyn SqlExecutor, dialect: &dyn Dialect) -> MigrateResult<()> {
        conn.execute_batch(&self.create_table_sql(dialect))
            .await
            .map_err(|e| {
                MigrationError::bookkeeping(
                    format!("failed to create {} table", self.table_name),
                    e,
                )
            })?;

        let Some(index_sql) = self.create_index_sql(dialect) else {
            return Ok(());
        };

        if let Err(e) = conn.execute_batch(&index_sql).await {
            if self.unique_versions {
                return Err(MigrationError::bookkeeping(
                    format!("failed to create unique index {}", self.index_name),
                    e,
                ));
            }
            warn!(
                index = %self.index_name,
                backend = dialect.name(),
                error = %e,
                "Could not create bookkeeping index"
            );
        }

        Ok(())
    }

    /// IDs of every recorded migration.
    pub async fn applied(&self, conn: &dyn SqlExecutor) -> MigrateResult<HashSet<String>> {
        let versions = conn
            .query_column(&format!("SELECT version FROM {}", self.table_name))
            .await
            .map_err(|e| {
                MigrationError::bookkeeping(
                    format!("failed to read {}", self.table_name),
                    e,
                )
            })?;

        debug!(count = versions.len(), "Loaded applied migrations");
        Ok(versions.into_iter().collect())
    }

    /// Record `id` as applied now.
    pub async fn record(
        &self,
        conn: &dyn SqlExecutor,
        dialect: &dyn Dialect,
        id: &str,
    ) -> MigrateResult<()> {
        let sql = format!(
            "INSERT INTO {} (version, applied_at) VALUES ({})",
            self.table_name,
            dialect.placeholders(2),
        );
        conn.execute(&sql, &[SqlValue::from(id), SqlValue::from(Utc::now())])
            .await
            .map_err(|e| {
                MigrationError::bookkeeping(format!("failed to record migration {}", id), e)
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gassi_query::{MysqlDialect, PostgresDialect, SqliteDialect};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_table_per_dialect() {
        let history = MigrationHistory::default();

        assert_eq!(
            history.create_table_sql(&SqliteDialect::new()),
            "CREATE TABLE IF NOT EXISTS schema_migrations (version TEXT NOT NULL, applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP)"
        );
        assert_eq!(
            history.create_table_sql(&MysqlDialect::new()),
            "CREATE TABLE IF NOT EXISTS schema_migrations (version VARCHAR(255) NOT NULL, applied_at DATETIME DEFAULT CURRENT_TIMESTAMP, INDEX idx_schema_migrations_version (version)) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci"
        );
        assert!(
            history
                .create_table_sql(&PostgresDialect::new())
                .contains("version VARCHAR(255) NOT NULL")
        );
    }

    #[test]
    fn test_index_uniqueness_is_opt_in() {
        assert_eq!(
            MigrationHistory::default()
                .create_index_sql(&SqliteDialect::new())
                .as_deref(),
            Some("CREATE INDEX IF NOT EXISTS idx_schema_migrations_version ON schema_migrations(version)")
        );
        assert_eq!(
            MigrationHistory::new("gassi_history", "idx_gassi_history", true)
                .create_index_sql(&PostgresDialect::new())
                .as_deref(),
            Some("CREATE UNIQUE INDEX IF NOT EXISTS idx_gassi_history ON gassi_history(version)")
        );
    }

    #[test]
    fn test_mysql_declares_unique_index_inline() {
        let history = MigrationHistory::new("gassi_history", "idx_gassi_history", true);
        let mysql = MysqlDialect::new();

        assert!(
            history
                .create_table_sql(&mysql)
                .contains("applied_at DATETIME DEFAULT CURRENT_TIMESTAMP, UNIQUE KEY idx_gassi_history (version))")
        );
        assert_eq!(history.create_index_sql(&mysql), None);
    }
}
