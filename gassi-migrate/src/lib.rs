//! # gassi-migrate
//!
//! Forward-only, cross-dialect schema migrations.
//!
//! - [`Migration`]: an ID, a description and one SQL body per backend
//! - [`MigrationRegistry`]: the set of known migrations, applied in ID order
//! - [`MigrationRunner`]: applies pending migrations and records them in a
//!   `schema_migrations` bookkeeping table
//! - [`ErrorClassifier`]: decides which failures mean "already applied"
//!
//! ## Example
//!
//! ```rust,no_run
//! use gassi_migrate::{Migration, MigrationRegistry, MigrationRunner, RunnerConfig};
//! use gassi_query::DialectFactory;
//! use gassi_sqlite::SqliteConnection;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = MigrationRegistry::builtin().with(
//!     Migration::new("010_add_dog_notes", "Add notes column to dogs")
//!         .sqlite("ALTER TABLE dogs ADD COLUMN notes TEXT")
//!         .mysql("ALTER TABLE dogs ADD COLUMN notes TEXT")
//!         .postgres("ALTER TABLE dogs ADD COLUMN IF NOT EXISTS notes TEXT"),
//! );
//!
//! let conn = SqliteConnection::open_url("sqlite://gassi.db").await?;
//! let runner = MigrationRunner::new(registry).config(RunnerConfig::new());
//! let report = runner.run_for(&conn, &DialectFactory::new(), "sqlite").await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

mod builtin;

pub mod classifier;
pub mod error;
pub mod history;
pub mod migration;
pub mod registry;
pub mod runner;

pub use classifier::ErrorClassifier;
pub use error::{MigrateResult, MigrationError};
pub use history::{DEFAULT_INDEX_NAME, DEFAULT_TABLE_NAME, MigrationHistory};
pub use migration::Migration;
pub use registry::MigrationRegistry;
pub use runner::{MigrationReport, MigrationRunner, MigrationStatus, RunnerConfig};
