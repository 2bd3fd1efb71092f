//! Applies pending migrations in ID order and records them.

use std::collections::HashSet;
use std::time::Instant;

use gassi_query::{Dialect, DialectFactory, SqlExecutor};
use tracing::{debug, info, warn};

use crate::classifier::ErrorClassifier;
use crate::error::{MigrateResult, MigrationError};
use crate::history::{DEFAULT_INDEX_NAME, DEFAULT_TABLE_NAME, MigrationHistory};
use crate::registry::MigrationRegistry;

/// Configuration for the migration runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Name of the bookkeeping table.
    pub table_name: String,
    /// Name of the index on the bookkeeping version column.
    pub index_name: String,
    /// Create the version index as `UNIQUE`.
    pub unique_versions: bool,
    /// Report what would run without executing or recording anything.
    pub dry_run: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            unique_versions: false,
            dry_run: false,
        }
    }
}

impl RunnerConfig {
    /// Create a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bookkeeping table name.
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Set the bookkeeping index name.
    pub fn index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    /// Enforce one row per version with a unique index.
    ///
    /// Off by default: a single runner never records a version twice, and
    /// databases bootstrapped by older tooling may hold duplicate rows. When
    /// on, failing to build the index aborts the run. On MySQL the index is
    /// declared inline, so a table created earlier without it is not altered.
    pub fn unique_versions(mut self, unique: bool) -> Self {
        self.unique_versions = unique;
        self
    }

    /// Enable dry-run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn history(&self) -> MigrationHistory {
        MigrationHistory::new(&self.table_name, &self.index_name, self.unique_versions)
    }
}

/// Result of a migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// IDs executed successfully, in order.
    pub applied: Vec<String>,
    /// IDs whose body failed with an "already exists" error and were recorded anyway.
    pub already_existing: Vec<String>,
    /// IDs that would be applied (dry run only).
    pub pending: Vec<String>,
    /// Number of migrations skipped because they were already recorded.
    pub skipped: usize,
    /// Total duration in milliseconds.
    pub duration_ms: i64,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl MigrationReport {
    /// Number of migrations newly recorded, including already-existing ones.
    pub fn applied_count(&self) -> usize {
        self.applied.len() + self.already_existing.len()
    }

    /// Check if anything was recorded.
    pub fn has_changes(&self) -> bool {
        self.applied_count() > 0
    }

    /// Get a summary of the report.
    pub fn summary(&self) -> String {
        if self.dry_run {
            return if self.pending.is_empty() {
                "No pending migrations".to_string()
            } else {
                format!("[DRY RUN] {} pending", self.pending.len())
            };
        }

        let mut parts = Vec::new();

        if !self.applied.is_empty() {
            parts.push(format!("{} applied", self.applied.len()));
        }

        if !self.already_existing.is_empty() {
            parts.push(format!("{} already existed", self.already_existing.len()));
        }

        if parts.is_empty() {
            "No pending migrations".to_string()
        } else {
            format!("{} in {}ms", parts.join(", "), self.duration_ms)
        }
    }
}

/// Migration status information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Number of distinct recorded versions.
    pub applied: usize,
    /// Number of registered migrations not yet recorded.
    pub pending: usize,
    /// IDs of pending migrations in apply order.
    pub pending_ids: Vec<String>,
}

impl MigrationStatus {
    /// Whether the database is up to date.
    pub fn is_up_to_date(&self) -> bool {
        self.pending == 0
    }
}

/// Runs the migrations of a registry against one connection.
///
/// ```rust,no_run
/// use gassi_migrate::{MigrationRegistry, MigrationRunner};
/// use gassi_query::SqliteDialect;
/// use gassi_sqlite::SqliteConnection;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let conn = SqliteConnection::open_in_memory().await?;
/// let runner = MigrationRunner::new(MigrationRegistry::builtin());
///
/// let report = runner.run(&conn, &SqliteDialect::new()).await?;
/// println!("{}", report.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MigrationRunner {
    registry: MigrationRegistry,
    config: RunnerConfig,
    classifier: ErrorClassifier,
}

impl MigrationRunner {
    /// Create a runner with default configuration and classifier.
    pub fn new(registry: MigrationRegistry) -> Self {
        Self {
            registry,
            config: RunnerConfig::default(),
            classifier: ErrorClassifier::default(),
        }
    }

    /// Replace the configuration.
    pub fn config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the error classifier.
    pub fn classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// The registry being applied.
    pub fn registry(&self) -> &MigrationRegistry {
        &self.registry
    }

    /// Apply every pending migration.
    ///
    /// Stops at the first migration that has no body for the dialect or
    /// fails with an error the classifier does not accept. Migrations
    /// applied before that point stay recorded, so the next run resumes.
    pub async fn run(
        &self,
        conn: &dyn SqlExecutor,
        dialect: &dyn Dialect,
    ) -> MigrateResult<MigrationReport> {
        let start = Instant::now();
        let backend = dialect.name();
        let history = self.config.history();

        history.ensure(conn, dialect).await?;
        let mut applied = history.applied(conn).await?;

        let mut report = MigrationReport {
            dry_run: self.config.dry_run,
            ..Default::default()
        };

        for migration in self.registry.all() {
            let id = migration.id();
            if applied.contains(id) {
                report.skipped += 1;
                continue;
            }

            let Some(body) = migration.body(backend) else {
                return Err(MigrationError::missing_body(id, backend));
            };

            if self.config.dry_run {
                info!("[DRY RUN] Would apply: {}", id);
                report.pending.push(id.to_string());
                continue;
            }

            info!("Applying migration: {} - {}", id, migration.description());

            match conn.execute_batch(body).await {
                Ok(()) => {
                    history.record(conn, dialect, id).await?;
                    report.applied.push(id.to_string());
                }
                Err(e) if self.classifier.classify(backend, &e) => {
                    warn!(
                        migration = %id,
                        backend,
                        error = %e,
                        "Migration objects already exist, marking as applied"
                    );
                    history.record(conn, dialect, id).await?;
                    report.already_existing.push(id.to_string());
                }
                Err(e) => return Err(MigrationError::failed(id, backend, e)),
            }

            applied.insert(id.to_string());
        }

        report.duration_ms = start.elapsed().as_millis() as i64;

        if report.has_changes() {
            info!("Applied {} migration(s)", report.applied_count());
        } else if !report.dry_run {
            info!("No pending migrations");
        }

        Ok(report)
    }

    /// Resolve `backend` through `factory` and apply pending migrations.
    pub async fn run_for(
        &self,
        conn: &dyn SqlExecutor,
        factory: &DialectFactory,
        backend: &str,
    ) -> MigrateResult<MigrationReport> {
        let dialect = factory.get(backend)?;
        self.run(conn, dialect.as_ref()).await
    }

    /// Count applied and pending migrations without running any.
    pub async fn status(
        &self,
        conn: &dyn SqlExecutor,
        dialect: &dyn Dialect,
    ) -> MigrateResult<MigrationStatus> {
        let history = self.config.history();
        history.ensure(conn, dialect).await?;
        let applied: HashSet<String> = history.applied(conn).await?;

        let pending_ids: Vec<String> = self
            .registry
            .all()
            .into_iter()
            .filter(|m| !applied.contains(m.id()))
            .map(|m| m.id().to_string())
            .collect();

        debug!(applied = applied.len(), pending = pending_ids.len(), "Migration status");

        Ok(MigrationStatus {
            applied: applied.len(),
            pending: pending_ids.len(),
            pending_ids,
        })
    }
}
