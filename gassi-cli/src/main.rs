//! Gassi CLI - command-line runner for Gassi schema migrations.

use clap::Parser;

use gassi_cli::cli::{Cli, Command};
use gassi_cli::commands;
use gassi_cli::error::{CliError, CliResult};
use gassi_cli::output;

fn main() {
    let cli = Cli::parse();

    // Logging reads the environment, so set it up before the runtime starts threads.
    if cli.database.verbose {
        gassi_query::logging::init_debug();
    } else {
        gassi_query::logging::init();
    }

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::from)
        .and_then(|runtime| runtime.block_on(run(cli)));

    if let Err(e) = result {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Migrate(args) => commands::migrate::run(args, &cli.database).await,
        Command::Dialects => commands::dialects::run(),
    }
}
