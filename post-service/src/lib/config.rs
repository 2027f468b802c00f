use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub user_service: UserServiceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub grpc_port: u16,
}

/// Where the token authority lives and how long to wait for it.
#[derive(Debug, Deserialize, Clone)]
pub struct UserServiceConfig {
    pub grpc_url: String,
    #[serde(default = "UserServiceConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl UserServiceConfig {
    fn default_timeout_ms() -> u64 {
        2_000
    }

    /// Bound on connecting to the authority and on each `CheckToken` call.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// `config/default.toml`, then `config/{RUN_MODE}.toml`, then
    /// `SECTION__KEY` environment variables, each overriding the last.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?
            .try_deserialize()
    }
}
