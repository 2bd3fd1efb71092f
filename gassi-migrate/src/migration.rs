//! The migration value type.

use std::collections::BTreeMap;

/// A forward-only schema change with one SQL body per backend.
///
/// Bodies are keyed by dialect name (`sqlite`, `mysql`, `postgres`) and may
/// contain several `;`-separated statements. A body should be idempotent on
/// its own (`IF NOT EXISTS`, insert-or-ignore); where the backend cannot
/// express that, the runner's error classifier covers the gap.
///
/// ```rust
/// use gassi_migrate::Migration;
///
/// let m = Migration::new("010_add_dog_notes", "Add notes column to dogs")
///     .sqlite("ALTER TABLE dogs ADD COLUMN notes TEXT")
///     .mysql("ALTER TABLE dogs ADD COLUMN notes TEXT")
///     .postgres("ALTER TABLE dogs ADD COLUMN IF NOT EXISTS notes TEXT");
///
/// assert!(m.supports("postgres"));
/// assert_eq!(m.body("sqlite"), Some("ALTER TABLE dogs ADD COLUMN notes TEXT"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    id: String,
    description: String,
    bodies: BTreeMap<String, String>,
}

impl Migration {
    /// Create a migration without bodies.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            bodies: BTreeMap::new(),
        }
    }

    /// Set the body for `backend`, replacing any previous one.
    pub fn up(mut self, backend: &str, sql: impl Into<String>) -> Self {
        self.bodies.insert(normalize(backend), sql.into());
        self
    }

    /// Set the SQLite body.
    pub fn sqlite(self, sql: impl Into<String>) -> Self {
        self.up("sqlite", sql)
    }

    /// Set the MySQL body.
    pub fn mysql(self, sql: impl Into<String>) -> Self {
        self.up("mysql", sql)
    }

    /// Set the PostgreSQL body.
    pub fn postgres(self, sql: impl Into<String>) -> Self {
        self.up("postgres", sql)
    }

    /// Unique, lexically ordered identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// SQL body for `backend`.
    pub fn body(&self, backend: &str) -> Option<&str> {
        self.bodies.get(&normalize(backend)).map(String::as_str)
    }

    /// Whether a body exists for `backend`.
    pub fn supports(&self, backend: &str) -> bool {
        self.bodies.contains_key(&normalize(backend))
    }

    /// Backends with a body, in name order.
    pub fn backends(&self) -> impl Iterator<Item = &str> {
        self.bodies.keys().map(String::as_str)
    }
}

fn normalize(backend: &str) -> String {
    backend.trim().to_lowercase()
}
