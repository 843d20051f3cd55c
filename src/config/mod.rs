use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Default YAML file consulted when no environment configuration is present.
pub const DEFAULT_CONFIG_FILE: &str = "escola.yaml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub max_connections: u32,
}

impl AppConfig {
    fn from_env() -> Self {
        let port = env::var("ESCOLA_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Self { port, max_connections }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("database configuration missing: set DATABASE_URL, the DB_* variables, or provide {0}")]
    Missing(String),

    #[error("invalid database configuration: {0}")]
    Invalid(String),
}

/// Connection settings for the school database. Field names match the
/// DB_* environment variables and the YAML config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub database: String,
}

fn default_port() -> u16 {
    5432
}

impl DatabaseConfig {
    /// Reads DB_HOST, DB_PORT, DB_USER, DB_PASSWORD and DB_NAME.
    /// Host, user and database name are the minimum; port defaults to 5432.
    pub fn from_env() -> Option<Self> {
        let host = env::var("DB_HOST").ok()?;
        let user = env::var("DB_USER").ok()?;
        let database = env::var("DB_NAME").ok()?;
        let port = env::var("DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let password = env::var("DB_PASSWORD").unwrap_or_default();

        Some(Self { host, port, user, password, database })
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Invalid(format!("{path}: {e}")))?;
        serde_yaml::from_str(&raw).map_err(|e| ConfigError::Invalid(format!("{path}: {e}")))
    }

    /// Builds a postgres:// URL with the credentials percent-encoded.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        let base = format!("postgres://{}:{}/{}", self.host, self.port, self.database);
        let mut url = url::Url::parse(&base).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        url.set_username(&self.user)
            .map_err(|_| ConfigError::Invalid("invalid database user".to_string()))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|_| ConfigError::Invalid("invalid database password".to_string()))?;
        }
        Ok(url.to_string())
    }
}

/// Resolution order: DATABASE_URL, then the DB_* variables, then the local
/// YAML file (path overridable via ESCOLA_CONFIG).
pub fn database_url() -> Result<String, ConfigError> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url);
    }

    if let Some(settings) = DatabaseConfig::from_env() {
        return settings.connection_url();
    }

    let path = env::var("ESCOLA_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    if std::path::Path::new(&path).exists() {
        return DatabaseConfig::from_file(&path)?.connection_url();
    }

    Err(ConfigError::Missing(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_url_encodes_credentials() {
        let settings = DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            user: "escola".to_string(),
            password: "p@ss:word".to_string(),
            database: "escola_db".to_string(),
        };
        let url = settings.connection_url().unwrap();
        assert!(url.starts_with("postgres://escola:"));
        assert!(url.ends_with("@localhost:5432/escola_db"));
        assert!(!url.contains("p@ss:word"));
    }

    #[test]
    fn connection_url_without_password() {
        let settings = DatabaseConfig {
            host: "db.internal".to_string(),
            port: 5433,
            user: "escola".to_string(),
            password: String::new(),
            database: "escola_db".to_string(),
        };
        let url = settings.connection_url().unwrap();
        assert_eq!(url, "postgres://escola@db.internal:5433/escola_db");
    }

    #[test]
    fn parses_yaml_config_file() {
        let path = std::env::temp_dir().join("escola-api-config-test.yaml");
        std::fs::write(
            &path,
            "host: localhost\nuser: escola\npassword: secret\ndatabase: escola_db\n",
        )
        .unwrap();

        let settings = DatabaseConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 5432); // default when omitted
        assert_eq!(settings.password, "secret");

        std::fs::remove_file(path).ok();
    }

    // Env-var assertions grouped in one test so parallel test threads never
    // observe each other's mutations.
    #[test]
    fn resolves_environment_in_order() {
        std::env::set_var("DATABASE_URL", "postgres://u:p@localhost:5432/override_db");
        std::env::set_var("DB_HOST", "ignored");
        std::env::set_var("DB_USER", "ignored");
        std::env::set_var("DB_NAME", "ignored");
        assert_eq!(
            database_url().unwrap(),
            "postgres://u:p@localhost:5432/override_db"
        );

        std::env::remove_var("DATABASE_URL");
        std::env::set_var("DB_HOST", "localhost");
        std::env::set_var("DB_USER", "escola");
        std::env::set_var("DB_NAME", "escola_db");
        std::env::remove_var("DB_PORT");
        std::env::remove_var("DB_PASSWORD");
        assert_eq!(
            database_url().unwrap(),
            "postgres://escola@localhost:5432/escola_db"
        );

        std::env::remove_var("DB_HOST");
        std::env::remove_var("DB_USER");
        std::env::remove_var("DB_NAME");
        std::env::set_var("ESCOLA_CONFIG", "/nonexistent/escola.yaml");
        assert!(matches!(database_url(), Err(ConfigError::Missing(_))));
        std::env::remove_var("ESCOLA_CONFIG");
    }
}
