//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::Path;

use gassi_migrate::{DEFAULT_INDEX_NAME, DEFAULT_TABLE_NAME, RunnerConfig};
use gassi_query::DialectFactory;

use crate::cli::DatabaseArgs;
use crate::error::{CliError, CliResult};

/// Default config file name (lives in project root)
pub const CONFIG_FILE_NAME: &str = "gassi.toml";

/// URL used for SQLite when none is configured
pub const DEFAULT_SQLITE_URL: &str = "sqlite://gassi.db";

/// Gassi CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Migration configuration
    pub migrations: MigrationsConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply command-line and environment overrides
    pub fn with_overrides(mut self, args: &DatabaseArgs) -> Self {
        if let Some(db_type) = &args.database_type {
            self.database.db_type = db_type.clone();
        }
        if let Some(url) = &args.database_url {
            self.database.url = Some(url.clone());
        }
        self
    }

    /// Resolve the backend name and connection URL
    pub fn connection(&self, factory: &DialectFactory) -> CliResult<ConnectionTarget> {
        let dialect = factory.get(&self.database.db_type)?;
        let backend = dialect.name();

        let url = match (&self.database.url, backend) {
            (Some(url), _) => url.clone(),
            (None, "sqlite") => DEFAULT_SQLITE_URL.to_string(),
            (None, _) => {
                return Err(CliError::Config(format!(
                    "a database URL is required for {} (set DATABASE_URL or [database] url)",
                    backend
                )));
            }
        };

        Ok(ConnectionTarget {
            backend: backend.to_string(),
            url,
        })
    }

    /// Runner configuration from the `[migrations]` table
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig::new()
            .table_name(&self.migrations.table_name)
            .index_name(&self.migrations.index_name)
            .unique_versions(self.migrations.unique_versions)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database backend (sqlite, mysql, postgres)
    #[serde(rename = "type")]
    pub db_type: String,

    /// Database connection URL
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: "sqlite".to_string(),
            url: None,
        }
    }
}

/// Migration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationsConfig {
    /// Bookkeeping table name
    pub table_name: String,

    /// Bookkeeping index name
    pub index_name: String,

    /// Create the bookkeeping index as UNIQUE
    pub unique_versions: bool,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            unique_versions: false,
        }
    }
}

/// Where to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    /// Canonical backend name
    pub backend: String,
    /// Connection URL
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
            [database]
            type = "postgresql"
            url = "postgres://gassi@localhost/gassi"

            [migrations]
            unique_versions = true
            "#,
        )
        .unwrap();

        assert_eq!(config.database.db_type, "postgresql");
        assert!(config.migrations.unique_versions);
        assert_eq!(config.migrations.table_name, "schema_migrations");

        let target = config.connection(&DialectFactory::new()).unwrap();
        assert_eq!(target.backend, "postgres");
    }

    #[test]
    fn test_overrides_win() {
        let args = DatabaseArgs {
            database_type: Some("mysql".into()),
            database_url: Some("mysql://root@localhost/gassi".into()),
            ..Default::default()
        };
        let config = Config::default().with_overrides(&args);

        assert_eq!(
            config.connection(&DialectFactory::new()).unwrap(),
            ConnectionTarget {
                backend: "mysql".into(),
                url: "mysql://root@localhost/gassi".into(),
            }
        );
    }

    #[test]
    fn test_sqlite_default_url() {
        let target = Config::default()
            .connection(&DialectFactory::new())
            .unwrap();
        assert_eq!(target.url, DEFAULT_SQLITE_URL);
    }

    #[test]
    fn test_url_required_for_servers() {
        let mut config = Config::default();
        config.database.db_type = "mysql".into();
        let err = config.connection(&DialectFactory::new()).unwrap_err();
        assert!(err.to_string().contains("database URL is required for mysql"));
    }

    #[test]
    fn test_unknown_backend() {
        let mut config = Config::default();
        config.database.db_type = "oracle".into();
        let err = config.connection(&DialectFactory::new()).unwrap_err();
        assert!(err.to_string().contains("unsupported database type: oracle"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("gassi.toml")).unwrap();
        assert_eq!(config.database.db_type, "sqlite");
    }
}
