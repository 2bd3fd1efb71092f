//! SQLite connection wrapper.

use async_trait::async_trait;
use gassi_query::{QueryResult, SqlExecutor, SqlValue};
use tokio_rusqlite::Connection;
use tracing::{debug, info};

use crate::config::{DatabasePath, SqliteConfig};
use crate::error::{SqliteError, SqliteResult};
use crate::types::{to_sqlite_value, value_ref_to_string};

/// A single SQLite connection running on a dedicated background thread.
pub struct SqliteConnection {
    conn: Connection,
    config: SqliteConfig,
}

impl SqliteConnection {
    /// Open a connection as described by `config`.
    pub async fn open(config: SqliteConfig) -> SqliteResult<Self> {
        let conn = match &config.path {
            DatabasePath::Memory => Connection::open_in_memory().await?,
            DatabasePath::File(path) => Connection::open(path).await?,
        };

        let foreign_keys = config.foreign_keys;
        let busy_timeout = config.busy_timeout();
        conn.call(move |conn| {
            if let Some(timeout) = busy_timeout {
                conn.busy_timeout(timeout)?;
            }
            if foreign_keys {
                conn.execute_batch("PRAGMA foreign_keys = ON")?;
            }
            Ok(())
        })
        .await?;

        info!(path = config.path_str(), "Opened SQLite database");
        Ok(Self { conn, config })
    }

    /// Open a fresh in-memory database.
    pub async fn open_in_memory() -> SqliteResult<Self> {
        Self::open(SqliteConfig::memory()).await
    }

    /// Open the database named by a `sqlite:` URL.
    pub async fn open_url(url: &str) -> SqliteResult<Self> {
        Self::open(SqliteConfig::from_url(url)?).await
    }

    /// The configuration this connection was opened with.
    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    /// Get the inner connection.
    pub fn inner(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection, waiting for the background thread to finish.
    pub async fn close(self) -> SqliteResult<()> {
        self.conn
            .close()
            .await
            .map_err(|e| SqliteError::connection(e.to_string()))
    }
}

impl std::fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("path", &self.config.path_str())
            .finish()
    }
}

#[async_trait]
impl SqlExecutor for SqliteConnection {
    async fn execute_batch(&self, sql: &str) -> QueryResult<()> {
        debug!(sql = %sql, "Executing batch");
        let sql = sql.to_string();
        self.conn
            .call(move |conn| Ok(conn.execute_batch(&sql)?))
            .await
            .map_err(|e| SqliteError::from(e).into())
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> QueryResult<u64> {
        debug!(sql = %sql, params = params.len(), "Executing statement");
        let sql = sql.to_string();
        let values: Vec<rusqlite::types::Value> = params.iter().map(to_sqlite_value).collect();
        let affected = self
            .conn
            .call(move |conn| Ok(conn.execute(&sql, rusqlite::params_from_iter(values.iter()))?))
            .await
            .map_err(SqliteError::from)?;
        Ok(affected as u64)
    }

    async fn query_column(&self, sql: &str) -> QueryResult<Vec<String>> {
        debug!(sql = %sql, "Executing query");
        let sql = sql.to_string();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let mut rows = stmt.query([])?;
                let mut values = Vec::new();
                while let Some(row) = rows.next()? {
                    if let Some(value) = value_ref_to_string(row.get_ref(0)?) {
                        values.push(value);
                    }
                }
                Ok(values)
            })
            .await
            .map_err(|e| SqliteError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_execute_and_query() {
        let conn = SqliteConnection::open_in_memory().await.unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT NOT NULL); CREATE TABLE u (id INTEGER)")
            .await
            .unwrap();

        let affected = conn
            .execute("INSERT INTO t (name) VALUES (?)", &[SqlValue::from("b")])
            .await
            .unwrap();
        assert_eq!(affected, 1);
        conn.execute("INSERT INTO t (name) VALUES (?)", &[SqlValue::from("a")])
            .await
            .unwrap();

        let names = conn.query_column("SELECT name FROM t ORDER BY name").await.unwrap();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_query_column_renders_integers() {
        let conn = SqliteConnection::open_in_memory().await.unwrap();
        let values = conn.query_column("SELECT 42").await.unwrap();
        assert_eq!(values, vec!["42".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_column_message_survives() {
        let conn = SqliteConnection::open_in_memory().await.unwrap();
        conn.execute_batch("CREATE TABLE dogs (id INTEGER)").await.unwrap();
        conn.execute_batch("ALTER TABLE dogs ADD COLUMN photo_thumbnail TEXT")
            .await
            .unwrap();

        let err = conn
            .execute_batch("ALTER TABLE dogs ADD COLUMN photo_thumbnail TEXT")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("duplicate column name"), "{err}");
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let conn = SqliteConnection::open_in_memory().await.unwrap();
        let values = conn.query_column("PRAGMA foreign_keys").await.unwrap();
        assert_eq!(values, vec!["1".to_string()]);
    }
}
