use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use godot_manager_client::cli::{Cli, Command};
use godot_manager_client::commands::{self, Context};
use godot_manager_client::config::{self, ClientConfig};
use godot_manager_client::metadata::{BIN_NAME, PKG_NAME, PKG_VERSION};
use godot_manager_client::{HttpClient, ServiceResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.global.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ServiceResult<()> {
    let settings_path = match cli.global.settings {
        Some(path) => path,
        None => config::default_settings_path()?,
    };
    let config = ClientConfig::load(&settings_path)?
        .with_overrides(cli.global.base_url, cli.global.timeout);
    tracing::debug!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        settings = %settings_path.display(),
        "resolved configuration"
    );

    let json = cli.global.json;
    match cli.command {
        Command::Version => {
            println!("{} {} ({})", BIN_NAME, PKG_VERSION, PKG_NAME);
            Ok(())
        }
        Command::Config(command) => commands::config::run(command, &config, &settings_path, json),
        Command::Project(command) => {
            commands::project::run(&connect(&config, json)?, command).await
        }
        Command::Task(command) => commands::task::run_task(&connect(&config, json)?, command).await,
        Command::Subtask(command) => {
            commands::task::run_subtask(&connect(&config, json)?, command).await
        }
        Command::Journal(command) => {
            commands::journal::run(&connect(&config, json)?, command).await
        }
    }
}

fn connect(config: &ClientConfig, json: bool) -> ServiceResult<Context> {
    Ok(Context::new(HttpClient::from_config(config)?, json))
}
