//! SQLite connection for the Gassi migration engine.
//!
//! Wraps a `tokio-rusqlite` connection and implements
//! [`gassi_query::SqlExecutor`] so the migration runner can drive it.
//!
//! # Example
//!
//! ```rust,no_run
//! use gassi_query::SqlExecutor;
//! use gassi_sqlite::SqliteConnection;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = SqliteConnection::open_url("sqlite://./gassi.db").await?;
//! conn.execute_batch("CREATE TABLE IF NOT EXISTS t (id INTEGER)").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod types;

pub use config::{DatabasePath, SqliteConfig};
pub use connection::SqliteConnection;
pub use error::{SqliteError, SqliteResult};
