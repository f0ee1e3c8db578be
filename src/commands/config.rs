//! Configuration commands.
//!
//! - `config show`: display the effective configuration
//! - `config get` / `config set`: read or write a single key
//! - `config path`: print where the file lives

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::{CONFIG_KEYS, Config};
use crate::error::Result;

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;

    let mut json_output = serde_json::Map::new();
    let mut text_output = format!("{}\n\n", "Configuration:".cyan().bold());

    for key in CONFIG_KEYS {
        let value = config.get(key)?;
        text_output.push_str(&format!("{}: {}\n", key.cyan(), value));
        json_output.insert(key.to_string(), json!(value));
    }
    json_output.insert(
        "config_file".to_string(),
        json!(path.to_string_lossy()),
    );

    text_output.push('\n');
    text_output.push_str(
        &format!("Config file: {}", path.display())
            .dimmed()
            .to_string(),
    );

    CommandOutput::new(json_output.into())
        .with_text(text_output)
        .print(output)
}

/// Get a configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let value = config.get(key)?;

    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(value)
    .print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let stored = config.get(key)?;
    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": stored,
        "success": true,
    }))
    .with_text(format!("Set {} to {}", key.cyan(), stored))
    .print(output)
}

/// Print the config file path
pub fn cmd_config_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}
