//! Config command handlers

use anyhow::{bail, Context, Result};

use kardex_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "inventory_file": config.inventory_path(),
                    "low_stock_threshold": config.low_stock_threshold,
                    "users": config.users.keys().collect::<Vec<_>>()
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  data_dir:            {}", config.data_dir.display());
            println!("  inventory_file:      {}", config.inventory_path().display());
            println!("  low_stock_threshold: {}", config.low_stock_threshold);
            if config.users.is_empty() {
                println!("  users:               (none - open store)");
            } else {
                println!(
                    "  users:               {}",
                    config.users.keys().cloned().collect::<Vec<_>>().join(", ")
                );
            }
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "data_dir" => {
            config.data_dir = value.clone().into();
        }
        "low_stock_threshold" => {
            config.low_stock_threshold = value
                .parse()
                .context("Invalid value for low_stock_threshold. Use a whole number.")?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, low_stock_threshold\n\
                 (edit the config file directly to manage users)",
                key
            );
        }
    }

    config.save().context("Failed to save configuration")?;
    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}
