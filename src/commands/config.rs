use std::path::Path;

use colored::Colorize;
use dialoguer::{Confirm, Input};

use crate::cli::ConfigCommand;
use crate::config::ClientConfig;
use crate::error::{ServiceError, ServiceResult};

/// `resolved` already carries flag/env overrides; `edit` works on the file
/// contents alone so overrides never leak into the saved settings.
pub fn run(
    command: ConfigCommand,
    resolved: &ClientConfig,
    settings_path: &Path,
    json: bool,
) -> ServiceResult<()> {
    match command {
        ConfigCommand::Show => {
            if json {
                println!("{}", serde_json::to_string_pretty(resolved)?);
            } else {
                println!("{}", render_config(resolved, settings_path));
            }
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", settings_path.display());
            Ok(())
        }
        ConfigCommand::Edit => edit(settings_path),
    }
}

pub fn render_config(config: &ClientConfig, settings_path: &Path) -> String {
    format!(
        "{} {}\n{} {}s\n{} {}",
        "base_url:".bold(),
        config.base_url,
        "timeout:".bold(),
        config.timeout_secs,
        "settings:".bold(),
        settings_path.display().to_string().dimmed()
    )
}

fn edit(settings_path: &Path) -> ServiceResult<()> {
    let current = ClientConfig::load(settings_path)?;

    let base_url = Input::<String>::new()
        .with_prompt("Backend base URL")
        .with_initial_text(current.base_url.clone())
        .interact_text()
        .map_err(prompt_error)?;
    let timeout_secs = Input::<u64>::new()
        .with_prompt("Request timeout (seconds)")
        .default(current.timeout_secs)
        .interact_text()
        .map_err(prompt_error)?;

    let updated = ClientConfig {
        base_url: base_url.trim().to_string(),
        timeout_secs,
    };
    updated.validate()?;

    if updated == current {
        println!("{}", "No changes.".dimmed());
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("Write {}?", settings_path.display()))
        .default(true)
        .interact()
        .map_err(prompt_error)?;
    if confirmed {
        updated.save(settings_path)?;
        println!("{} {}", "Saved".green().bold(), settings_path.display());
    }
    Ok(())
}

fn prompt_error(e: dialoguer::Error) -> ServiceError {
    ServiceError::Other(format!("prompt failed: {}", e))
}
