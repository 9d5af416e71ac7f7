mod database;
mod server;

pub use database::*;
pub use server::*;

use anyhow::{Context, Result};
use config::Config;
use serde::Deserialize;
use sqlx::PgPool;
use std::env;
use std::path::Path;
use tracing::debug;

pub const CONFIG_ENV: &str = "BBOARD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/bboard/config.toml";

/// Top-level application configuration.
///
/// Groups the sections of the TOML file:
/// - `[database]` → [`DatabaseConfig`]
/// - `[server]`   → [`ServerConfig`]
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BboardConfig {
    pub database: Option<DatabaseConfig>,
    pub server: Option<ServerConfig>,
}

impl BboardConfig {
    /// Path of the config file, from `BBOARD_CONFIG` or the default location.
    pub fn path() -> String {
        env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
    }

    /// Loads `config.toml` (optional) overlaid with `BBOARD__*` environment variables.
    pub fn load() -> Result<Self> {
        let config_path = Self::path();
        debug!("{} => {}", CONFIG_ENV, config_path);
        Self::load_from(&config_path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("BBOARD").separator("__"))
            .build()
            .context("loading configuration")?;

        settings
            .try_deserialize::<Self>()
            .with_context(|| format!("parsing configuration from {}", path.display()))
    }

    pub fn database(&self) -> Result<&DatabaseConfig> {
        self.database
            .as_ref()
            .context("missing [database] section in configuration")
    }

    /// Server section, falling back to defaults when absent.
    pub fn server_config(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub async fn db_pool(&self) -> Result<PgPool> {
        crate::db::connect(self.database()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn loads_sections_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[database]
host = "db.internal"
user = "bboard"
password = "s3cret"
name = "bboard"
acquire_timeout = "2s"

[server]
port = 9090
"#
        )
        .unwrap();

        let cfg = BboardConfig::load_from(file.path()).unwrap();
        let db = cfg.database().unwrap();
        assert_eq!(db.host, "db.internal");
        assert_eq!(db.port, 5432);
        assert_eq!(db.max_connections, 5);
        assert_eq!(db.acquire_timeout, Duration::from_secs(2));

        let server = cfg.server_config();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 9090);
    }

    #[test]
    fn missing_file_yields_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = BboardConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert!(cfg.database().is_err());
        assert_eq!(cfg.server_config().bind_address(), "0.0.0.0:8000");
    }
}
