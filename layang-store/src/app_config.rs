use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub search: SearchDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

/// Defaults the public search UI relies on: the "load more" step and the
/// bounds of the price slider. Served to the frontend via /api/settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchDefaults {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_min_price")]
    pub min_price: i64,
    #[serde(default = "default_max_price")]
    pub max_price: i64,
}

fn default_page_size() -> usize {
    5
}

fn default_min_price() -> i64 {
    100_000
}

fn default_max_price() -> i64 {
    100_000_000
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            min_price: default_min_price(),
            max_price: default_max_price(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of LAYANG)
            // Eg.. `LAYANG__SERVER__PORT=8080` would set the server port
            .add_source(config::Environment::with_prefix("LAYANG").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
