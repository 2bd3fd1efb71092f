//! Lookup of dialects by backend name.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use super::{Dialect, MysqlDialect, PostgresDialect, SqliteDialect};
use crate::error::{QueryError, QueryResult};

/// Backend used when no name is given.
pub const DEFAULT_DIALECT: &str = "sqlite";

#[derive(Debug, Clone)]
struct Entry {
    dialect: Arc<dyn Dialect>,
    alias: bool,
}

/// Registry mapping lowercase backend names to shared dialect instances.
///
/// Constructors run once at registration; lookups hand out clones of the
/// same `Arc`, so every caller asking for `"postgres"` sees one instance.
#[derive(Debug, Clone)]
pub struct DialectFactory {
    entries: HashMap<String, Entry>,
}

impl DialectFactory {
    /// Create a factory with the built-in SQLite, MySQL and PostgreSQL
    /// dialects plus the `postgresql` alias.
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory.register("sqlite", SqliteDialect::new);
        factory.register("mysql", MysqlDialect::new);
        factory.register("postgres", PostgresDialect::new);
        // The target was registered just above.
        let _ = factory.register_alias("postgresql", "postgres");
        factory
    }

    /// Create a factory with nothing registered.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a dialect under `name`, replacing any previous entry.
    pub fn register<D, F>(&mut self, name: &str, constructor: F) -> &mut Self
    where
        D: Dialect + 'static,
        F: FnOnce() -> D,
    {
        self.entries.insert(
            normalize(name),
            Entry {
                dialect: Arc::new(constructor()),
                alias: false,
            },
        );
        self
    }

    /// Register `alias` as another name for the already registered `target`.
    pub fn register_alias(&mut self, alias: &str, target: &str) -> QueryResult<&mut Self> {
        let dialect = self.lookup(&normalize(target))?;
        self.entries
            .insert(normalize(alias), Entry { dialect, alias: true });
        Ok(self)
    }

    /// Resolve a backend name. An empty name selects SQLite.
    pub fn get(&self, name: &str) -> QueryResult<Arc<dyn Dialect>> {
        let mut name = normalize(name);
        if name.is_empty() {
            name = DEFAULT_DIALECT.to_string();
        }
        self.lookup(&name)
    }

    /// Resolve a backend name, falling back to SQLite when it is unknown.
    pub fn get_or_default(&self, name: &str) -> QueryResult<Arc<dyn Dialect>> {
        match self.get(name) {
            Ok(dialect) => Ok(dialect),
            Err(QueryError::UnsupportedDatabase { .. }) => {
                warn!(requested = name, fallback = DEFAULT_DIALECT, "Unknown database type");
                self.lookup(DEFAULT_DIALECT)
            }
            Err(e) => Err(e),
        }
    }

    /// Check whether a name (or alias) is registered.
    pub fn is_supported(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize(name))
    }

    /// Registered canonical names, sorted. Aliases are not listed.
    pub fn list_supported(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.alias)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    fn lookup(&self, name: &str) -> QueryResult<Arc<dyn Dialect>> {
        self.entries
            .get(name)
            .map(|entry| Arc::clone(&entry.dialect))
            .ok_or_else(|| QueryError::UnsupportedDatabase {
                name: name.to_string(),
                supported: self.list_supported().join(", "),
            })
    }
}

impl Default for DialectFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
