//! PostgreSQL connection wrapper.

use async_trait::async_trait;
use gassi_query::{QueryResult, SqlExecutor, SqlValue};
use tokio::task::JoinHandle;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};
use tracing::{debug, error, info};

use crate::config::PgConfig;
use crate::error::{PgError, PgResult};
use crate::statement::translate_placeholders;
use crate::types::to_sql_params;

/// A single PostgreSQL connection.
///
/// The socket is driven by a background task spawned on connect; dropping
/// the connection aborts it.
pub struct PgConnection {
    client: Client,
    driver: JoinHandle<()>,
}

impl PgConnection {
    /// Connect using `config`.
    pub async fn connect(config: &PgConfig) -> PgResult<Self> {
        let (client, connection) = config
            .to_pg_config()
            .connect(NoTls)
            .await
            .map_err(|e| PgError::connection(e.to_string()))?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "PostgreSQL connection error");
            }
        });

        info!(host = %config.host, port = config.port, database = %config.database, "Connected to PostgreSQL");
        Ok(Self { client, driver })
    }

    /// Connect using a `postgres://` URL.
    pub async fn connect_url(url: &str) -> PgResult<Self> {
        Self::connect(&PgConfig::from_url(url)?).await
    }

    /// Get the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Check whether the connection has been closed.
    pub fn is_closed(&self) -> bool {
        self.client.is_closed()
    }
}

impl Drop for PgConnection {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

impl std::fmt::Debug for PgConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgConnection")
            .field("closed", &self.client.is_closed())
            .finish()
    }
}

#[async_trait]
impl SqlExecutor for PgConnection {
    async fn execute_batch(&self, sql: &str) -> QueryResult<()> {
        debug!(sql = %sql, "Executing batch");
        self.client
            .batch_execute(sql)
            .await
            .map_err(|e| PgError::from(e).into())
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> QueryResult<u64> {
        let (sql, _) = translate_placeholders(sql);
        debug!(sql = %sql, params = params.len(), "Executing statement");

        let stmt = self.client.prepare(&sql).await.map_err(PgError::from)?;
        let params = to_sql_params(params, stmt.params())?;
        let refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let affected = self
            .client
            .execute(&stmt, &refs)
            .await
            .map_err(PgError::from)?;
        Ok(affected)
    }

    async fn query_column(&self, sql: &str) -> QueryResult<Vec<String>> {
        debug!(sql = %sql, "Executing query");
        // The simple protocol returns every column as text.
        let messages = self
            .client
            .simple_query(sql)
            .await
            .map_err(PgError::from)?;

        Ok(messages
            .iter()
            .filter_map(|message| match message {
                SimpleQueryMessage::Row(row) => row.get(0).map(str::to_string),
                _ => None,
            })
            .collect())
    }
}
