//! SQLite configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{SqliteError, SqliteResult};

/// SQLite database configuration.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database path (or ":memory:" for in-memory).
    pub path: DatabasePath,
    /// Enable foreign keys when opening.
    pub foreign_keys: bool,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: Option<u32>,
}

/// Database path configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabasePath {
    /// In-memory database.
    #[default]
    Memory,
    /// File-based database.
    File(PathBuf),
}

impl DatabasePath {
    /// Get the path string for SQLite.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Memory => ":memory:",
            Self::File(path) => path.to_str().unwrap_or(":memory:"),
        }
    }

    /// Check if this is an in-memory database.
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: DatabasePath::Memory,
            foreign_keys: true,
            busy_timeout_ms: Some(5000),
        }
    }
}

impl SqliteConfig {
    /// Configuration for an in-memory database.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Configuration for a file-based database.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            path: DatabasePath::File(path.as_ref().to_path_buf()),
            ..Default::default()
        }
    }

    /// Parse a SQLite URL into configuration.
    ///
    /// Supported formats:
    /// - `sqlite::memory:` or `:memory:`
    /// - `sqlite://path/to/db.sqlite`
    /// - `sqlite:path/to/db.sqlite`
    /// - `file:path/to/db.sqlite`
    /// - a bare file path
    ///
    /// Query parameters `foreign_keys` and `busy_timeout` are honored.
    pub fn from_url(url: impl AsRef<str>) -> SqliteResult<Self> {
        let url_str = url.as_ref().trim();

        if url_str.is_empty() {
            return Err(SqliteError::config("database path is required"));
        }
        if url_str == "sqlite::memory:" || url_str == ":memory:" {
            return Ok(Self::memory());
        }

        let (location, query) = match url_str.split_once('?') {
            Some((location, query)) => (location, Some(query)),
            None => (url_str, None),
        };

        let path = if let Some(rest) = location.strip_prefix("sqlite://") {
            rest
        } else if let Some(rest) = location.strip_prefix("sqlite:") {
            rest
        } else if let Some(rest) = location.strip_prefix("file:") {
            rest
        } else {
            location
        };

        let mut config = match path {
            "" => return Err(SqliteError::config("database path is required")),
            ":memory:" => Self::memory(),
            path => Self::file(path),
        };

        for pair in query.unwrap_or_default().split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "mode" if value == "memory" => config.path = DatabasePath::Memory,
                "foreign_keys" => config.foreign_keys = matches!(value, "true" | "1" | "on"),
                "busy_timeout" => {
                    let ms = value.parse().map_err(|_| {
                        SqliteError::config(format!("invalid busy_timeout '{value}'"))
                    })?;
                    config.busy_timeout_ms = Some(ms);
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Get the path string for SQLite.
    pub fn path_str(&self) -> &str {
        self.path.as_str()
    }

    /// Busy timeout as a duration.
    pub fn busy_timeout(&self) -> Option<Duration> {
        self.busy_timeout_ms.map(|ms| Duration::from_millis(u64::from(ms)))
    }

    /// Enable or disable foreign keys.
    pub fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    /// Set the busy timeout in milliseconds.
    pub fn busy_timeout_ms(mut self, ms: u32) -> Self {
        self.busy_timeout_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_memory() {
        let config = SqliteConfig::memory();
        assert!(config.path.is_memory());
        assert_eq!(config.path_str(), ":memory:");
    }

    #[test]
    fn test_from_url_memory() {
        assert!(SqliteConfig::from_url("sqlite::memory:").unwrap().path.is_memory());
        assert!(SqliteConfig::from_url(":memory:").unwrap().path.is_memory());
        assert!(SqliteConfig::from_url("sqlite::memory:?cache=shared").unwrap().path.is_memory());
    }

    #[test]
    fn test_from_url_file() {
        let config = SqliteConfig::from_url("sqlite://./gassi.db").unwrap();
        assert_eq!(config.path_str(), "./gassi.db");

        let config = SqliteConfig::from_url("file:data/gassi.db").unwrap();
        assert_eq!(config.path_str(), "data/gassi.db");

        let config = SqliteConfig::from_url("gassi.db").unwrap();
        assert_eq!(config.path_str(), "gassi.db");
    }

    #[test]
    fn test_from_url_with_options() {
        let config =
            SqliteConfig::from_url("sqlite://./gassi.db?foreign_keys=false&busy_timeout=250")
                .unwrap();
        assert!(!config.foreign_keys);
        assert_eq!(config.busy_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_from_url_rejects_empty_path() {
        assert!(SqliteConfig::from_url("sqlite://").is_err());
        assert!(SqliteConfig::from_url("").is_err());
        assert!(SqliteConfig::from_url("sqlite://x.db?busy_timeout=soon").is_err());
    }

    #[test]
    fn test_builder() {
        let config = SqliteConfig::file("x.db").foreign_keys(false).busy_timeout_ms(10);
        assert!(!config.foreign_keys);
        assert_eq!(config.busy_timeout_ms, Some(10));
    }
}
