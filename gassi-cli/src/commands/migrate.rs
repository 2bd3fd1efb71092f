//! `gassi migrate` commands - apply and inspect migrations.

use gassi_migrate::{MigrationRegistry, MigrationRunner};
use gassi_query::DialectFactory;

use crate::cli::{DatabaseArgs, MigrateArgs, MigrateRunArgs, MigrateSubcommand};
use crate::commands::connect;
use crate::config::Config;
use crate::error::CliResult;
use crate::output::{self, success, warn};

/// Run the migrate command
pub async fn run(args: MigrateArgs, database: &DatabaseArgs) -> CliResult<()> {
    let config = Config::load_or_default(&database.config)?.with_overrides(database);
    let registry = MigrationRegistry::builtin();

    match args.command {
        MigrateSubcommand::Run(run_args) => run_apply(run_args, &config, registry).await,
        MigrateSubcommand::Status => run_status(&config, registry).await,
        MigrateSubcommand::List => run_list(&config, &registry),
    }
}

/// Run `gassi migrate run`
async fn run_apply(
    args: MigrateRunArgs,
    config: &Config,
    registry: MigrationRegistry,
) -> CliResult<()> {
    output::header(if args.dry_run {
        "Migrate Run (dry run)"
    } else {
        "Migrate Run"
    });

    let factory = DialectFactory::new();
    let target = config.connection(&factory)?;
    output::kv("Database", &target.backend);
    output::kv("URL", &output::redact_url(&target.url));
    output::kv("Table", &config.migrations.table_name);
    output::newline();

    let session = connect(&target, &factory).await?;
    let runner = MigrationRunner::new(registry)
        .config(config.runner_config().dry_run(args.dry_run));

    let report = runner
        .run(session.conn.as_ref(), session.dialect.as_ref())
        .await?;

    if report.dry_run {
        for id in &report.pending {
            output::list_item(&output::style_pending(id));
        }
        output::newline();
        output::info(&report.summary());
        return Ok(());
    }

    for id in &report.applied {
        output::list_item(&output::style_success(id));
    }
    for id in &report.already_existing {
        warn(&format!("{} already existed, marked as applied", id));
    }

    output::newline();
    if report.has_changes() {
        success(&report.summary());
    } else {
        output::info(&report.summary());
    }

    Ok(())
}

/// Run `gassi migrate status`
async fn run_status(config: &Config, registry: MigrationRegistry) -> CliResult<()> {
    output::header("Migration Status");

    let factory = DialectFactory::new();
    let target = config.connection(&factory)?;
    output::kv("Database", &target.backend);
    output::kv("URL", &output::redact_url(&target.url));

    let session = connect(&target, &factory).await?;
    let runner = MigrationRunner::new(registry).config(config.runner_config());
    let status = runner
        .status(session.conn.as_ref(), session.dialect.as_ref())
        .await?;

    output::kv("Applied", &status.applied.to_string());
    output::kv("Pending", &status.pending.to_string());
    output::newline();

    if status.is_up_to_date() {
        success("Database is up to date");
    } else {
        for id in &status.pending_ids {
            output::list_item(&output::style_pending(id));
        }
        output::newline();
        output::info("Run `gassi migrate run` to apply pending migrations");
    }

    Ok(())
}

/// Run `gassi migrate list`
fn run_list(config: &Config, registry: &MigrationRegistry) -> CliResult<()> {
    output::header("Migrations");

    let dialect = DialectFactory::new().get(&config.database.db_type)?;
    let backend = dialect.name();

    for (i, migration) in registry.all().iter().enumerate() {
        let backends: Vec<&str> = migration.backends().collect();
        output::numbered_item(
            i + 1,
            &format!(
                "{} - {} [{}]",
                migration.id(),
                migration.description(),
                backends.join(", ")
            ),
        );
    }

    let missing = registry.missing_bodies(backend);
    output::newline();
    if missing.is_empty() {
        success(&format!(
            "All {} migrations support {}",
            registry.len(),
            backend
        ));
    } else {
        for id in &missing {
            warn(&format!("{} has no SQL for {}", id, backend));
        }
    }

    Ok(())
}
