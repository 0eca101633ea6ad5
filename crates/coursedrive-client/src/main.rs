//! coursedrive CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use coursedrive_client::cli::{Cli, Command, ConfigAction};
use coursedrive_client::commands::{config as config_cmd, course, server};
use coursedrive_client::config::ClientConfig;
use coursedrive_client::error::{ClientError, ClientResult};
use coursedrive_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = match cli.command {
        Command::Serve { .. } => TracingConfig::server(),
        _ => TracingConfig::cli(),
    };
    let tracing_config = if cli.debug {
        tracing_config.with_level(Level::DEBUG)
    } else {
        tracing_config
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let mut config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config)?,
        None => ClientConfig::load().map_err(ClientError::Config)?,
    };
    cli.apply_overrides(&mut config);

    match cli.command {
        Command::Serve { listen } => server::run(&config, listen).await,
        Command::Open { ref course, all } => {
            let loader = course::build_loader(&config)?;
            course::open(&loader, course, &cli.outline_options(all)).await
        }
        Command::View {
            ref course,
            ref lesson,
            open,
            copy,
        } => {
            let loader = course::build_loader(&config)?;
            course::view(&loader, course, lesson, open, copy).await
        }
        Command::Complete { ref course } => {
            let loader = course::build_loader(&config)?;
            course::complete(&loader, course).await
        }
        Command::Courses => {
            let loader = course::build_loader(&config)?;
            course::courses(&loader).await
        }
        Command::Config { ref action } => match action {
            ConfigAction::Dump => config_cmd::dump(&config),
            ConfigAction::Validate => config_cmd::validate(&config),
            ConfigAction::Path => config_cmd::path(&config),
        },
    }
}
