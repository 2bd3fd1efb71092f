//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;

/// Gassi - cross-dialect schema migrations
#[derive(Parser, Debug)]
#[command(name = "gassi")]
#[command(version)]
#[command(about = "Apply Gassi schema migrations to SQLite, MySQL or PostgreSQL", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Connection options shared by every command
    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Connection options
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Database backend (sqlite, mysql, postgres)
    #[arg(long, global = true, env = "DB_TYPE")]
    pub database_type: Option<String>,

    /// Database connection URL
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Database migration commands
    Migrate(MigrateArgs),

    /// List supported database backends
    Dialects,
}

/// Arguments for the `migrate` command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub command: MigrateSubcommand,
}

/// Migrate subcommands
#[derive(Subcommand, Debug)]
pub enum MigrateSubcommand {
    /// Apply pending migrations
    Run(MigrateRunArgs),

    /// Show applied and pending migrations
    Status,

    /// List registered migrations without connecting
    List,
}

/// Arguments for `migrate run`
#[derive(Args, Debug, Default)]
pub struct MigrateRunArgs {
    /// Show what would be applied without changing the database
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_migrate_run() {
        let cli = Cli::try_parse_from([
            "gassi",
            "migrate",
            "run",
            "--dry-run",
            "--database-type",
            "mysql",
        ])
        .unwrap();

        assert_eq!(cli.database.database_type.as_deref(), Some("mysql"));
        match cli.command {
            Command::Migrate(MigrateArgs {
                command: MigrateSubcommand::Run(args),
            }) => assert!(args.dry_run),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_defaults_to_gassi_toml() {
        let cli = Cli::try_parse_from(["gassi", "dialects"]).unwrap();
        assert_eq!(cli.database.config, PathBuf::from("gassi.toml"));
    }
}
