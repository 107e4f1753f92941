use std::env;
use std::fs;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;

const DEFAULT_CONFIG_PATH: &str = "weatherhub.toml";

#[derive(Deserialize)]
pub struct Config {
    pub web_server: WebServerConfig,
    pub db: DbConfig,
    pub weather_api: WeatherApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize)]
pub struct WebServerConfig {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize)]
pub struct DbConfig {
    pub db_path: String,
}

#[derive(Deserialize)]
pub struct WeatherApiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: default_level() }
    }
}

fn default_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_timeout() -> u64 { 10 }

fn default_level() -> String { "info".to_string() }

/// Loads the configuration file and initializes logging.
///
/// The config path is taken from the first command line argument,
/// falling back to `weatherhub.toml` in the working directory.
pub fn config() -> Result<Config, ConfigError> {
    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let raw = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&raw)?;

    setup_logger(&config.logging)?;

    if config.weather_api.api_key.is_empty() {
        log::warn!("weather_api.api_key is not set, upstream requests will likely fail");
    }

    Ok(config)
}
