//! Configuration commands for the console.
//!
//! - `config show`: Display current configuration
//! - `config set`: Set a configuration value
//! - `config get`: Print a single value

use owo_colors::OwoColorize;
use url::Url;

use crate::config::Config;
use crate::error::{AdminError, Result};

fn validate_api_base(value: &str) -> Result<()> {
    let parsed = Url::parse(value)
        .map_err(|e| AdminError::Config(format!("invalid api_base '{value}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AdminError::Config(format!(
            "invalid api_base '{value}': expected an http or https URL"
        )));
    }
    Ok(())
}

/// Show current configuration
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("{}\n", "Configuration:".cyan().bold());

    let api_base = config.api_base();
    if api_base.is_empty() {
        println!("{}: {}", "api_base".cyan(), "not set".dimmed());
    } else {
        println!("{}: {}", "api_base".cyan(), api_base);
    }
    println!("{}: {}", "listen".cyan(), config.listen());

    println!();
    println!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    );
    Ok(())
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "api_base" => {
            validate_api_base(value)?;
            config.set_api_base(value.to_string());
            config.save()?;
            println!("Set {} to {}", "api_base".cyan(), value);
        }
        "listen" => {
            if value.is_empty() {
                return Err(AdminError::Config("listen cannot be empty".to_string()));
            }
            config.set_listen(value.to_string());
            config.save()?;
            println!("Set {} to {}", "listen".cyan(), value);
        }
        _ => {
            return Err(AdminError::Config(format!(
                "unknown config key '{key}'. Valid keys: api_base, listen"
            )));
        }
    }
    Ok(())
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;

    match key {
        "api_base" => {
            let api_base = config.api_base();
            if api_base.is_empty() {
                return Err(AdminError::Config("api_base not set".to_string()));
            }
            println!("{api_base}");
        }
        "listen" => {
            println!("{}", config.listen());
        }
        _ => {
            return Err(AdminError::Config(format!(
                "unknown config key '{key}'. Valid keys: api_base, listen"
            )));
        }
    }
    Ok(())
}
