use anyhow::Result;
use config::{Config, Map};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub lineage: LineageConfig,
    pub rotation: RotationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
}

/// Deployment environment. Error details are only exposed in development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn expose_error_details(&self) -> bool {
        self.environment == Environment::Development
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineageConfig {
    /// Levels below a spiritual parent that still count towards its downlines.
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RotationConfig {
    /// IANA zone used to turn calendar dates and times into instants.
    pub timezone: String,
}

/// Prefix for environment overrides. Nesting uses a double underscore, so
/// `lineage.max_depth` is `CHAPTERHOUSE_LINEAGE__MAX_DEPTH`.
pub const ENV_PREFIX: &str = "CHAPTERHOUSE";

/// Plain database URL variable shared with diesel's tooling. A prefixed
/// `CHAPTERHOUSE_DATABASE__URL` still wins over it.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, the process environment and an
    /// optional `config.toml`, in increasing precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// ## Summary
    /// Same as [`Self::load`], reading variables from `vars` instead of the
    /// process environment when given.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load_from(vars: Option<Map<String, String>>) -> Result<Self> {
        let database_url = match &vars {
            Some(vars) => vars.get(DATABASE_URL_VAR).cloned(),
            None => std::env::var(DATABASE_URL_VAR).ok(),
        };

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("server.environment", "production")?
            .set_default("database.max_connections", 4)?
            .set_default("logging.level", "info")?
            .set_default("lineage.max_depth", 10)?
            .set_default("rotation.timezone", "Asia/Manila")?;
        if let Some(url) = database_url.filter(|url| !url.is_empty()) {
            builder = builder.set_default("database.url", url)?;
        }

        Ok(builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true)
                    .source(vars),
            )
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
