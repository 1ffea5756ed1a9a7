//! Config command - inspect and edit the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use shipx_core::{ReportLayout, ShipxConfig};

use super::config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the configuration in effect
    Show,

    /// Write the default configuration
    Init {
        /// Write here instead of the configuration path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value, e.g. "sampling.max_pages" or "layout.sections.0.name"
    Get { key: String },

    /// Change one value (JSON, or a plain string)
    Set { key: String, value: String },

    /// Print the configuration file path
    Path,
}

pub async fn run(args: ConfigArgs, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = config_path(override_path);
    match args.command {
        ConfigCommand::Show => {
            if !path.exists() {
                eprintln!("{} No config file found, showing defaults.", style("ℹ").blue());
            }
            println!("{}", serde_json::to_string_pretty(&load_value(&path)?)?);
        }
        ConfigCommand::Init { output, force } => {
            let target = output.unwrap_or(path);
            if target.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    target.display()
                );
            }
            save(&ShipxConfig::default(), &target)?;
            println!("{} Created configuration file at {}", style("✓").green(), target.display());
        }
        ConfigCommand::Get { key } => {
            let json = load_value(&path)?;
            let value = json
                .pointer(&pointer(&key))
                .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigCommand::Set { key, value } => set_value(&path, &key, &value)?,
        ConfigCommand::Path => {
            let status = if path.exists() {
                style("exists").green()
            } else {
                style("not created, run 'shipx config init'").yellow()
            };
            println!("{} ({})", path.display(), status);
        }
    }
    Ok(())
}

/// The configuration at `path` (or the defaults) as a JSON tree.
fn load_value(path: &Path) -> anyhow::Result<Value> {
    let config = if path.exists() {
        ShipxConfig::from_file(path)?
    } else {
        ShipxConfig::default()
    };
    Ok(serde_json::to_value(config)?)
}

fn save(config: &ShipxConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

/// Replace an existing value. New keys are never created.
fn set_value(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let value: Value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let mut json = load_value(path)?;
    let slot = json
        .pointer_mut(&pointer(key))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    *slot = value.clone();

    let config: ShipxConfig = serde_json::from_value(json)?;
    ReportLayout::compile(&config.layout, &config.sampling)?;
    save(&config, path)?;

    println!("{} Set {} = {}", style("✓").green(), key, value);
    Ok(())
}

/// JSON pointer for a dotted key; numeric parts index arrays.
fn pointer(key: &str) -> String {
    key.split('.').map(|part| format!("/{}", part)).collect()
}
