use std::env;
use std::fmt;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub env: RunEnvironment,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub apps: Vec<AppConfig>,
}

/// Deployment environment; selects the log format and verbosity.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunEnvironment {
    #[default]
    Local,
    Dev,
    Prod,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub request_timeout_seconds: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub token_ttl_minutes: i64,
}

impl AuthConfig {
    /// Lifetime of every session token issued by this process.
    ///
    /// Rejects a non-positive lifetime and one that does not fit a `TimeDelta`.
    pub fn token_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if self.token_ttl_minutes <= 0 {
            return Err(ConfigError::Message(format!(
                "auth.token_ttl_minutes must be positive, got {}",
                self.token_ttl_minutes
            )));
        }

        chrono::Duration::try_minutes(self.token_ttl_minutes).ok_or_else(|| {
            ConfigError::Message(format!(
                "auth.token_ttl_minutes is out of range: {}",
                self.token_ttl_minutes
            ))
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// Application registration used to seed the in-memory store.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub id: i32,
    pub name: String,
    pub secret: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__TOKEN_TTL_MINUTES, DATABASE__URL, etc.)
    /// 2. Explicit config file (`--config` flag, else CONFIG_PATH)
    /// 3. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        let configuration = builder.add_source(environment()).build()?;

        let config: Config = configuration.try_deserialize()?;
        config.auth.token_ttl()?;

        Ok(config)
    }
}

/// Example: DATABASE__URL=postgres://... overrides database.url
fn environment() -> Environment {
    Environment::default().separator("__").try_parsing(true)
}
