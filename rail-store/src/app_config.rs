use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub booking: BookingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    #[serde(default = "default_pnr_prefix")]
    pub pnr_prefix: String,
    #[serde(default = "default_pnr_suffix_digits")]
    pub pnr_suffix_digits: u32,
    #[serde(default = "default_pnr_max_attempts")]
    pub pnr_max_attempts: u32,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            pnr_prefix: default_pnr_prefix(),
            pnr_suffix_digits: default_pnr_suffix_digits(),
            pnr_max_attempts: default_pnr_max_attempts(),
        }
    }
}

fn default_max_connections() -> u32 { 5 }
fn default_pnr_prefix() -> String { rail_core::pnr::DEFAULT_PREFIX.to_string() }
fn default_pnr_suffix_digits() -> u32 { rail_core::pnr::DEFAULT_SUFFIX_DIGITS }
fn default_pnr_max_attempts() -> u32 { 5 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn load_from(config_dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name(&format!("{}/default", config_dir)))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name(&format!("{}/local", config_dir)).required(false))
            // Environment, e.g. `RAIL_DATABASE__URL=sqlite://other.db`
            .add_source(config::Environment::with_prefix("RAIL").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
