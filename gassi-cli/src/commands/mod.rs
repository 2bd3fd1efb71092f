//! CLI command implementations.

pub mod dialects;
pub mod migrate;

use std::sync::Arc;

use gassi_query::{Dialect, DialectFactory, SqlExecutor};
use tracing::debug;

use crate::config::ConnectionTarget;
use crate::error::{CliError, CliResult};

/// An open connection and the dialect it speaks.
pub struct Session {
    /// The connection.
    pub conn: Box<dyn SqlExecutor>,
    /// Its dialect.
    pub dialect: Arc<dyn Dialect>,
}

/// Open a connection to `target` and apply the backend's session settings.
pub async fn connect(target: &ConnectionTarget, factory: &DialectFactory) -> CliResult<Session> {
    let dialect = factory.get(&target.backend)?;

    let conn: Box<dyn SqlExecutor> = match dialect.name() {
        #[cfg(feature = "sqlite")]
        "sqlite" => Box::new(gassi_sqlite::SqliteConnection::open_url(&target.url).await?),
        #[cfg(feature = "mysql")]
        "mysql" => Box::new(gassi_mysql::MysqlConnection::connect_url(&target.url).await?),
        #[cfg(feature = "postgres")]
        "postgres" => Box::new(gassi_postgres::PgConnection::connect_url(&target.url).await?),
        other => {
            return Err(CliError::Config(format!(
                "gassi was built without {} support",
                other
            )));
        }
    };

    dialect.apply_settings(conn.as_ref()).await?;
    debug!(backend = dialect.name(), "Session settings applied");

    Ok(Session { conn, dialect })
}
