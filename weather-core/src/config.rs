use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";
pub const DEFAULT_FORECAST_DAYS: u32 = 9;
pub const DEFAULT_QUERY_PARAM: &str = "query";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";

/// Settings for the upstream provider. Read-only once a gateway is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as `days` on every request.
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,

    /// Name of the location parameter. WeatherAPI.com itself expects `q`.
    #[serde(default = "default_query_param")]
    pub query_param: String,

    /// No timeout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), ..Self::default() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            forecast_days: default_forecast_days(),
            query_param: default_query_param(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [provider]
/// api_key = "..."
/// forecast_days = 9
///
/// [server]
/// listen = "127.0.0.1:3000"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-gateway", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.provider.api_key = api_key;
    }

    pub fn is_configured(&self) -> bool {
        !self.provider.api_key.is_empty()
    }

    /// Override file values with `WEATHER_*` environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("WEATHER_API_KEY") {
            self.provider.api_key = key;
        }
        if let Some(url) = lookup("WEATHER_BASE_URL") {
            self.provider.base_url = url;
        }
        if let Some(days) = lookup("WEATHER_FORECAST_DAYS") {
            self.provider.forecast_days = days
                .trim()
                .parse()
                .with_context(|| format!("Invalid WEATHER_FORECAST_DAYS value: {days}"))?;
        }
        if let Some(listen) = lookup("WEATHER_LISTEN") {
            self.server.listen = listen;
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_forecast_days() -> u32 {
    DEFAULT_FORECAST_DAYS
}

fn default_query_param() -> String {
    DEFAULT_QUERY_PARAM.to_string()
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}
