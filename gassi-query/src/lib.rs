//! # gassi-query
//!
//! Core building blocks of the Gassi migration engine:
//!
//! - [`Dialect`] with SQLite, MySQL and PostgreSQL implementations
//! - [`DialectFactory`] resolving backend names (and aliases) to dialects
//! - [`SqlExecutor`], the async seam every driver crate implements
//! - [`SqlValue`] parameters and the shared [`QueryError`]
//!
//! ## Dialects
//!
//! ```rust
//! use gassi_query::DialectFactory;
//!
//! let factory = DialectFactory::new();
//! let mysql = factory.get("mysql").unwrap();
//!
//! let sql = format!(
//!     "CREATE TABLE dogs (id {}, active {} DEFAULT {}){}",
//!     mysql.auto_increment(),
//!     mysql.boolean_type(),
//!     mysql.boolean_literal(true),
//!     mysql.table_suffix(),
//! );
//! assert!(sql.starts_with("CREATE TABLE dogs (id INT AUTO_INCREMENT PRIMARY KEY"));
//!
//! assert!(factory.get("oracle").is_err());
//! assert_eq!(factory.list_supported(), vec!["mysql", "postgres", "sqlite"]);
//! ```

pub mod dialect;
pub mod error;
pub mod executor;
pub mod logging;
pub mod sql;
pub mod value;

pub use dialect::{Dialect, DialectFactory, MysqlDialect, PostgresDialect, SqliteDialect};
pub use error::{QueryError, QueryResult};
pub use executor::SqlExecutor;
pub use value::SqlValue;

pub use logging::{get_log_format, get_log_level, init as init_logging, init_debug, is_debug_enabled};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::dialect::{Dialect, DialectFactory};
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::executor::SqlExecutor;
    pub use crate::value::SqlValue;
}
