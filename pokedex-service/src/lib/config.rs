use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for pokedex-service.
///
/// Loaded once at startup and never reloaded.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default = "default_expires_seconds")]
    pub expires_seconds: i64,
}

/// Argon2 work factor used for new password hashes.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    #[serde(default = "default_memory_cost_kib")]
    pub memory_cost_kib: u32,
    #[serde(default = "default_time_cost")]
    pub time_cost: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: default_memory_cost_kib(),
            time_cost: default_time_cost(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expires_seconds() -> i64 {
    3600
}

// Argon2's recommended parameters (OWASP minimum for Argon2id).
fn default_memory_cost_kib() -> u32 {
    19 * 1024
}

fn default_time_cost() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables
            .add_source(environment_overrides())
            .build()?;

        configuration.try_deserialize()
    }
}

/// Environment source mapping `JWT__SECRET` onto `jwt.secret`.
///
/// No prefix: with an empty prefix every variable would have to start with
/// the separator and none of the documented overrides would match.
fn environment_overrides() -> Environment {
    Environment::default().separator("__")
}
