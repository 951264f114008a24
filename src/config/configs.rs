use std::net::SocketAddr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }

    /// Returns the database section. Only valid after `validate` has passed.
    pub fn database(&self) -> Result<&DatabaseConfig> {
        self.database
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("database config is missing"))
    }
}

impl EnvConfig for AppConfig {
    fn apply_legacy_env(&mut self) {
        // Deployments of the first release only knew DATABASE_PATH.
        if self.database.is_none() {
            if let Ok(path) = std::env::var(defaults::LEGACY_DATABASE_PATH_VAR) {
                self.database = Some(DatabaseConfig::for_path(path));
            }
        }
    }

    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
}

impl GeneralConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid host/port '{}:{}'", self.host, self.port))
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT as u16,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:` for a throwaway database.
    pub path: String,
    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_db_min_idle")]
    pub min_idle: u32,
}

impl DatabaseConfig {
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            max_connections: default_db_max_connections(),
            min_idle: default_db_min_idle(),
        }
    }

    pub fn in_memory() -> Self {
        Self::for_path(defaults::IN_MEMORY_PATH)
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.trim() == defaults::IN_MEMORY_PATH
    }

    /// sqlx connection url for `path`. File databases are created when missing.
    pub fn url(&self) -> String {
        if self.is_in_memory() {
            return "sqlite::memory:".to_string();
        }
        format!("sqlite://{}?mode=rwc", self.path.trim())
    }
}

fn default_db_max_connections() -> u32 {
    defaults::DEFAULT_DB_MAX_CONNECTIONS as u32
}

fn default_db_min_idle() -> u32 {
    defaults::DEFAULT_DB_MIN_IDLE as u32
}
