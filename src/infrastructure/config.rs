//! Configuration infrastructure
//!
//! The configuration object is constructed once at startup and passed to
//! the components that need it; there is no package-level mutable state.
//! Settings come from an optional JSON file with environment-variable
//! overrides for the database connection.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,

    /// Upper bound on pooled connections.
    pub max_connections: u32,

    /// How long a request may wait for a pooled connection.
    pub acquire_timeout_seconds: u64,

    /// Deadline applied to the paginated listing query.
    pub query_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            dbname: "catalog".to_string(),
            max_connections: 10,
            acquire_timeout_seconds: 5,
            query_timeout_seconds: 10,
        }
    }
}

impl DatabaseConfig {
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.dbname
        )
    }

    /// Applies `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`
    /// from the given lookup. Split out from the process environment so it
    /// can be exercised with a plain map.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("DB_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("DB_PORT").and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Some(user) = lookup("DB_USER") {
            self.user = user;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            self.password = password;
        }
        if let Some(dbname) = lookup("DB_NAME") {
            self.dbname = dbname;
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter when `RUST_LOG` is not set.
    pub level: String,

    /// Emit structured JSON instead of the human-readable format.
    pub json_format: bool,

    /// Also write to a daily-rolled file under `log_dir`.
    pub file_output: bool,

    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_output: false,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Default location of the config file.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shop-catalog")
            .join("config.json")
    }

    /// Loads the config file if it exists (defaults otherwise), then applies
    /// database overrides from the process environment.
    pub async fn load() -> Result<Self> {
        let mut config = Self::read_file(&Self::default_config_path()).await?;
        config
            .database
            .apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub async fn read_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides_from_map(map: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.max_connections, 10);
        assert!(!config.logging.json_format);
        assert_eq!(
            config.database.connection_url(),
            "postgres://postgres:@localhost:5432/catalog"
        );
    }

    #[test]
    fn env_overrides_take_precedence() {
        let mut vars = HashMap::new();
        vars.insert("DB_HOST".to_string(), "db.internal".to_string());
        vars.insert("DB_PORT".to_string(), "6432".to_string());
        vars.insert("DB_NAME".to_string(), "shop".to_string());

        let mut config = DatabaseConfig::default();
        config.apply_overrides(overrides_from_map(vars));

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6432);
        assert_eq!(config.dbname, "shop");
        assert_eq!(config.user, "postgres");
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let mut config = DatabaseConfig::default();
        config.apply_overrides(|key| {
            (key == "DB_PORT").then(|| "not-a-port".to_string())
        });
        assert_eq!(config.port, 5432);
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = AppConfig::read_file(&dir.path().join("absent.json")).await?;
        assert_eq!(config.database.dbname, "catalog");
        Ok(())
    }

    #[tokio::test]
    async fn file_values_are_loaded() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        let mut on_disk = AppConfig::default();
        on_disk.database.dbname = "pharmacy".to_string();
        on_disk.logging.level = "debug".to_string();
        tokio::fs::write(&path, serde_json::to_string_pretty(&on_disk)?).await?;

        let loaded = AppConfig::read_file(&path).await?;
        assert_eq!(loaded.database.dbname, "pharmacy");
        assert_eq!(loaded.logging.level, "debug");
        Ok(())
    }
}
