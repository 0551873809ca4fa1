use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use tradewatch::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use tradewatch::adapter::inbound::cli::{config, run, status, traders, verify};
use tradewatch::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<ExitCode> {
    if let Commands::Config(ConfigCommand::Validate) = &cli.command {
        config::execute_validate(&cli.config)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    config.init_logging();
    info!(config = %cli.config.display(), "tradewatch starting");

    match &cli.command {
        Commands::Run(args) => run::execute(&config, args).await?,
        Commands::Traders(args) => traders::execute(&config, args).await?,
        Commands::Verify => {
            if !verify::execute(&config).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Status(args) => status::execute(&config, args)?,
        Commands::Config(ConfigCommand::Validate) => {}
    }
    Ok(ExitCode::SUCCESS)
}
