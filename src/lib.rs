//! # Gassi
//!
//! Forward-only, cross-dialect schema migrations for SQLite, MySQL and
//! PostgreSQL.
//!
//! Gassi provides:
//! - One [`Dialect`] per backend describing its SQL differences
//! - A [`DialectFactory`] resolving backend names and aliases
//! - A [`MigrationRegistry`] of migrations with one SQL body per backend
//! - A [`MigrationRunner`] that applies pending migrations in ID order and
//!   records them in `schema_migrations`
//! - An [`ErrorClassifier`] that treats "already exists" failures as applied
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gassi::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     gassi::init_logging();
//!
//!     let conn = gassi::sqlite::SqliteConnection::open_url("sqlite://gassi.db").await?;
//!     let dialect = DialectFactory::new().get("sqlite")?;
//!     dialect.apply_settings(&conn).await?;
//!
//!     let report = MigrationRunner::new(MigrationRegistry::builtin())
//!         .run(&conn, dialect.as_ref())
//!         .await?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Dialects, values and the connection seam.
pub mod query {
    pub use gassi_query::*;
}

/// Migration registry, runner and classifier.
pub mod migrate {
    pub use gassi_migrate::*;
}

/// SQLite connection.
#[cfg(feature = "sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "sqlite")))]
pub mod sqlite {
    pub use gassi_sqlite::*;
}

/// MySQL connection.
#[cfg(feature = "mysql")]
#[cfg_attr(docsrs, doc(cfg(feature = "mysql")))]
pub mod mysql {
    pub use gassi_mysql::*;
}

/// PostgreSQL connection.
#[cfg(feature = "postgres")]
#[cfg_attr(docsrs, doc(cfg(feature = "postgres")))]
pub mod postgres {
    pub use gassi_postgres::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::migrate::{
        ErrorClassifier, Migration, MigrationRegistry, MigrationReport, MigrationRunner,
        MigrationStatus, RunnerConfig,
    };
    pub use crate::query::{Dialect, DialectFactory, SqlExecutor, SqlValue};
}

// Re-export key types at the crate root
pub use gassi_migrate::{
    ErrorClassifier, MigrateResult, Migration, MigrationError, MigrationRegistry,
    MigrationReport, MigrationRunner, MigrationStatus, RunnerConfig,
};
pub use gassi_query::{
    Dialect, DialectFactory, QueryError, QueryResult, SqlExecutor, SqlValue, init_logging,
};
