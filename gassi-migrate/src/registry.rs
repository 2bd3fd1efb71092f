//! Ordered collection of migrations.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::warn;

use crate::migration::Migration;

/// Expected ID shape: three digits, underscore, snake_case description.
static ID_CONVENTION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d{3}_[a-z0-9_]+$").ok());

/// Registry of known migrations.
///
/// Migrations are kept in registration order; [`all`](Self::all) hands out
/// a copy sorted by ID, which is the order the runner applies them in.
/// Ordering is a plain string comparison, so IDs should share a fixed-width
/// numeric prefix.
#[derive(Debug, Clone, Default)]
pub struct MigrationRegistry {
    migrations: Vec<Migration>,
}

impl MigrationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the application schema.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for migration in crate::builtin::migrations() {
            registry.register(migration);
        }
        registry
    }

    /// Add a migration.
    ///
    /// IDs off the `NNN_description` convention or already present are
    /// accepted with a warning.
    pub fn register(&mut self, migration: Migration) -> &mut Self {
        if !follows_convention(migration.id()) {
            warn!(id = %migration.id(), "Migration ID does not follow NNN_description convention");
        }
        if self.get(migration.id()).is_some() {
            warn!(id = %migration.id(), "Migration ID registered more than once");
        }
        self.migrations.push(migration);
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, migration: Migration) -> Self {
        self.register(migration);
        self
    }

    /// All migrations sorted by ID.
    pub fn all(&self) -> Vec<Migration> {
        let mut sorted = self.migrations.clone();
        // Stable, so duplicates keep registration order.
        sorted.sort_by(|a, b| a.id().cmp(b.id()));
        sorted
    }

    /// Number of registered migrations.
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// First migration registered under `id`.
    pub fn get(&self, id: &str) -> Option<&Migration> {
        self.migrations.iter().find(|m| m.id() == id)
    }

    /// Sorted IDs of migrations with no body for `backend`.
    pub fn missing_bodies(&self, backend: &str) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|m| !m.supports(backend))
            .map(|m| m.id().to_string())
            .collect()
    }
}

impl FromIterator<Migration> for MigrationRegistry {
    fn from_iter<I: IntoIterator<Item = Migration>>(iter: I) -> Self {
        let mut registry = Self::new();
        for migration in iter {
            registry.register(migration);
        }
        registry
    }
}

fn follows_convention(id: &str) -> bool {
    ID_CONVENTION.as_ref().is_none_or(|re| re.is_match(id))
}
