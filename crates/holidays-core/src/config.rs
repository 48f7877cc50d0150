//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::source::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Holidays service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

const KEYS: [&str; 3] = ["server.bind_addr", "upstream.base_url", "upstream.timeout_secs"];

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("HOLIDAYS_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("holidays")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file (or defaults), then apply environment overrides
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file only, or defaults if it doesn't exist
    pub fn load_file() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Apply `HOLIDAYS_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(addr) = env::var("HOLIDAYS_BIND_ADDR") {
            self.set("server.bind_addr", &addr)?;
        }
        if let Ok(url) = env::var("HOLIDAYS_UPSTREAM_URL") {
            self.set("upstream.base_url", &url)?;
        }
        if let Ok(secs) = env::var("HOLIDAYS_UPSTREAM_TIMEOUT_SECS") {
            self.set("upstream.timeout_secs", &secs)?;
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.bind_addr.trim().is_empty() {
            return Err(anyhow!("server.bind_addr must not be empty"));
        }
        validate_base_url(&self.upstream.base_url)?;
        if self.upstream.timeout_secs == 0 {
            return Err(anyhow!("upstream.timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "server.bind_addr" => Ok(self.server.bind_addr.clone()),
            "upstream.base_url" => Ok(self.upstream.base_url.clone()),
            "upstream.timeout_secs" => Ok(self.upstream.timeout_secs.to_string()),
            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `holidays config show` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "server.bind_addr" => {
                let addr = value.trim();
                if addr.is_empty() {
                    return Err(anyhow!("server.bind_addr must not be empty"));
                }
                self.server.bind_addr = addr.to_string();
            }
            "upstream.base_url" => {
                validate_base_url(value)?;
                self.upstream.base_url = value.trim().to_string();
            }
            "upstream.timeout_secs" => {
                let secs: u64 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid timeout_secs value: {}", value))?;
                if secs == 0 {
                    return Err(anyhow!("upstream.timeout_secs must be greater than zero"));
                }
                self.upstream.timeout_secs = secs;
            }
            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `holidays config show` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        KEYS.iter()
            .map(|key| Ok((key.to_string(), self.get(key)?)))
            .collect()
    }
}

fn validate_base_url(url: &str) -> anyhow::Result<()> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow!(
            "upstream.base_url must start with http:// or https:// (got '{}')",
            url
        ));
    }
    Ok(())
}
