//! Top-level application configuration.
//!
//! Configuration is stored in `config.yaml` under the user config directory
//! and includes:
//! - Base URL of the repair-service backend API
//! - Address the console server binds to
//!
//! Both values can be overridden per invocation with `CLIMADMIN_API_BASE`
//! and `CLIMADMIN_LISTEN`; `CLIMADMIN_CONFIG_DIR` relocates the config file
//! itself.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{AdminError, Result};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8787";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the repair-service backend API
    #[serde(default)]
    pub api_base: String,

    /// Address the console server binds to (default: 127.0.0.1:8787)
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            listen: default_listen(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        if let Ok(dir) = env::var("CLIMADMIN_CONFIG_DIR")
            && !dir.is_empty()
        {
            return PathBuf::from(dir).join("config.yaml");
        }

        ProjectDirs::from("", "", "climadmin")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from(".climadmin").join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            AdminError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AdminError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            AdminError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions).map_err(|e| {
                AdminError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to set permissions on config at {}: {}",
                        path.display(),
                        e
                    ),
                ))
            })?;
        }

        Ok(())
    }

    /// Get the backend API base URL from environment variable or config
    pub fn api_base(&self) -> String {
        if let Ok(base) = env::var("CLIMADMIN_API_BASE")
            && !base.is_empty()
        {
            return base;
        }

        self.api_base.clone()
    }

    /// Get the console listen address from environment variable or config
    pub fn listen(&self) -> String {
        if let Ok(listen) = env::var("CLIMADMIN_LISTEN")
            && !listen.is_empty()
        {
            return listen;
        }

        self.listen.clone()
    }

    /// Set the backend API base URL
    pub fn set_api_base(&mut self, api_base: String) {
        self.api_base = api_base;
    }

    /// Set the console listen address
    pub fn set_listen(&mut self, listen: String) {
        self.listen = listen;
    }
}
