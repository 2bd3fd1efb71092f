//! The connection seam between the migration engine and the drivers.

use async_trait::async_trait;

use crate::error::QueryResult;
use crate::value::SqlValue;

/// A live database connection able to run SQL.
///
/// Implemented by the connection wrappers of `gassi-sqlite`,
/// `gassi-mysql` and `gassi-postgres`. Parameterized statements always use
/// `?` placeholders; a driver whose native syntax differs translates them.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Execute one or more `;`-separated statements without parameters.
    async fn execute_batch(&self, sql: &str) -> QueryResult<()>;

    /// Execute a single statement with bound parameters and return the
    /// number of affected rows.
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> QueryResult<u64>;

    /// Run a query and return the first column of every row as text.
    async fn query_column(&self, sql: &str) -> QueryResult<Vec<String>>;
}
