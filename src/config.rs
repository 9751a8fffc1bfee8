/// Environment configuration.
///
/// Database credentials and the server bind address come from environment
/// variables; a `.env` file in the working directory is loaded first.
/// Lookups are injected so the parsing can be exercised without touching
/// the process environment.

use crate::error::ConfigError;
use std::fmt;

pub const DB_HOST: &str = "DB_HOST";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_NAME: &str = "DB_NAME";

pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Load `.env` into the process environment if one exists.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
    }
}

/// Connection parameters for the sales database.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    /// Read the four `DB_*` variables after loading `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// Host, user and database name must be present and non-empty. The
    /// password must be present but may be empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut required = |name: &'static str, allow_empty: bool| match lookup(name) {
            Some(v) if allow_empty || !v.trim().is_empty() => v,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let host = required(DB_HOST, false);
        let user = required(DB_USER, false);
        let password = required(DB_PASSWORD, true);
        let database = required(DB_NAME, false);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(DbConfig {
            host,
            user,
            password,
            database,
        })
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Bind address of the dashboard server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        Ok(ServerConfig { host, port })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_db_config_complete() {
        let config = DbConfig::from_lookup(env(&[
            (DB_HOST, "db.local"),
            (DB_USER, "reader"),
            (DB_PASSWORD, "s3cret"),
            (DB_NAME, "ventas"),
        ]))
        .unwrap();

        assert_eq!(config.host, "db.local");
        assert_eq!(config.user, "reader");
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.database, "ventas");
    }

    #[test]
    fn test_db_config_reports_all_missing() {
        let err = DbConfig::from_lookup(env(&[(DB_USER, "reader")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(vec![DB_HOST, DB_PASSWORD, DB_NAME]));
    }

    #[test]
    fn test_db_config_blank_values() {
        let err = DbConfig::from_lookup(env(&[
            (DB_HOST, "  "),
            (DB_USER, "reader"),
            (DB_PASSWORD, ""),
            (DB_NAME, "ventas"),
        ]))
        .unwrap_err();
        // an empty password is allowed, a blank host is not
        assert_eq!(err, ConfigError::Missing(vec![DB_HOST]));
    }

    #[test]
    fn test_db_config_debug_hides_password() {
        let config = DbConfig::from_lookup(env(&[
            (DB_HOST, "h"),
            (DB_USER, "u"),
            (DB_PASSWORD, "hunter2"),
            (DB_NAME, "d"),
        ]))
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_server_config_overrides() {
        let config = ServerConfig::from_lookup(env(&[(HOST, "0.0.0.0"), (PORT, "9000")])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_server_config_bad_port() {
        let err = ServerConfig::from_lookup(env(&[(PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: PORT, .. }));

        assert!(ServerConfig::from_lookup(env(&[(PORT, "70000")])).is_err());
    }
}
