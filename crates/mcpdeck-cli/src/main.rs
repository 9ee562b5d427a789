//! CLI entry point.
//!
//! Wiring happens in `bootstrap`; this file only parses arguments and routes
//! each command to its handler.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use mcpdeck_cli::bootstrap::{init_logging, load_dotenv};
use mcpdeck_cli::{Cli, CliError, Commands, bootstrap, build_config, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let cli_error = err.downcast_ref::<CliError>();
            // Failed operations were already reported with the response.
            if !matches!(cli_error, Some(CliError::Failed(_))) {
                eprintln!("Error: {err:#}");
            }
            ExitCode::from(cli_error.map_or(1, CliError::exit_code))
        }
    }
}

async fn run(mut cli: Cli) -> Result<()> {
    let Some(command) = cli.command.take() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = build_config(&cli).context("Invalid configuration")?;
    let ctx = bootstrap(config, cli.json)?;

    match command {
        Commands::Catalog => handlers::catalog::execute(&ctx).await?,
        Commands::Ps => handlers::catalog::list_instances(&ctx).await?,
        Commands::Logs { id, tail } => handlers::logs::execute(&ctx, id, tail).await?,
        Commands::Start { id } => handlers::lifecycle::start(&ctx, id).await?,
        Commands::Stop { id } => handlers::lifecycle::stop(&ctx, id).await?,
        Commands::Restart { id } => handlers::lifecycle::restart(&ctx, id).await?,
        Commands::Remove { name, image } => handlers::lifecycle::remove(&ctx, name, image).await?,
        Commands::Deploy { script, set, wait } => {
            handlers::deploy::deploy(&ctx, script, set, wait).await?;
        }
        Commands::Redeploy {
            name,
            script,
            set,
            wait,
        } => handlers::deploy::redeploy(&ctx, name, script, set, wait).await?,
        Commands::Settings { command } => handlers::settings::execute(&ctx, command).await?,
        Commands::Paths { create } => handlers::paths::execute(&ctx, create)?,
        Commands::Config => handlers::config::execute(&ctx)?,
        Commands::Request { json, wait } => handlers::request::execute(&ctx, json, wait).await?,
    }
    Ok(())
}
