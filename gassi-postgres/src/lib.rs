//! PostgreSQL connection for the Gassi migration engine.
//!
//! Statements use `?` placeholders like every other backend; they are
//! numbered (`$1`, `$2`, ...) just before preparing.
//!
//! ```rust,no_run
//! use gassi_postgres::PgConnection;
//! use gassi_query::{SqlExecutor, SqlValue};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = PgConnection::connect_url("postgres://gassi@localhost/gassi").await?;
//! conn.execute(
//!     "INSERT INTO system_settings (key, value) VALUES (?, ?) ON CONFLICT DO NOTHING",
//!     &[SqlValue::from("booking_enabled"), SqlValue::from("true")],
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod statement;
pub mod types;

pub use config::{PgConfig, SslMode};
pub use connection::PgConnection;
pub use error::{PgError, PgResult};
pub use statement::translate_placeholders;
