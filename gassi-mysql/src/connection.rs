//! MySQL connection wrapper.

use async_trait::async_trait;
use gassi_query::{QueryResult, SqlExecutor, SqlValue};
use mysql_async::prelude::*;
use mysql_async::{Conn, Params, Row};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::MysqlConfig;
use crate::error::{MysqlError, MysqlResult};
use crate::types::{to_mysql_value, value_to_string};

/// A single MySQL connection.
///
/// The driver needs `&mut` access per statement; calls are serialized
/// through an async mutex so the connection can be shared as `&dyn
/// SqlExecutor`.
pub struct MysqlConnection {
    conn: Mutex<Conn>,
}

impl MysqlConnection {
    /// Wrap an established connection.
    pub fn new(conn: Conn) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Connect using `config`.
    pub async fn connect(config: &MysqlConfig) -> MysqlResult<Self> {
        let conn = Conn::new(config.to_opts_builder()).await?;
        info!(host = %config.host, port = config.port, database = %config.database, "Connected to MySQL");
        Ok(Self::new(conn))
    }

    /// Connect using a `mysql://` URL.
    pub async fn connect_url(url: &str) -> MysqlResult<Self> {
        Self::connect(&MysqlConfig::from_url(url)?).await
    }

    /// Close the connection gracefully.
    pub async fn disconnect(self) -> MysqlResult<()> {
        self.conn.into_inner().disconnect().await?;
        Ok(())
    }
}

impl std::fmt::Debug for MysqlConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MysqlConnection").finish_non_exhaustive()
    }
}

#[async_trait]
impl SqlExecutor for MysqlConnection {
    async fn execute_batch(&self, sql: &str) -> QueryResult<()> {
        debug!(sql = %sql, "Executing batch");
        let mut conn = self.conn.lock().await;
        conn.query_drop(sql).await.map_err(MysqlError::from)?;
        Ok(())
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> QueryResult<u64> {
        debug!(sql = %sql, params = params.len(), "Executing statement");
        let values = params
            .iter()
            .map(to_mysql_value)
            .collect::<MysqlResult<Vec<_>>>()?;
        let params = if values.is_empty() {
            Params::Empty
        } else {
            Params::Positional(values)
        };

        let mut conn = self.conn.lock().await;
        conn.exec_drop(sql, params).await.map_err(MysqlError::from)?;
        Ok(conn.affected_rows())
    }

    async fn query_column(&self, sql: &str) -> QueryResult<Vec<String>> {
        debug!(sql = %sql, "Executing query");
        let mut conn = self.conn.lock().await;
        let rows: Vec<Row> = conn.query(sql).await.map_err(MysqlError::from)?;
        Ok(rows
            .iter()
            .filter_map(|row| row.as_ref(0).and_then(value_to_string))
            .collect())
    }
}
