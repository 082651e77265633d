use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Intake";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PORT: u16 = 3000;

pub const ENV_ENCRYPTION_KEY: &str = "ENCRYPTION_KEY";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATABASE_PATH: &str = "INTAKE_DATABASE_PATH";

/// Default `tracing` filter when `RUST_LOG` is unset
pub fn default_log_filter() -> &'static str {
    "intake_lib=info,intake=info,tower_http=info"
}

/// Get the application data directory (~/Intake/)
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default SQLite file location
pub fn default_database_path() -> PathBuf {
    app_data_dir().join("intake.db")
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ENCRYPTION_KEY is not set")]
    MissingEncryptionKey,

    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("Invalid HOST value: {0}")]
    InvalidHost(String),
}

/// Runtime settings, read once at startup.
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub encryption_key: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_path", &self.database_path)
            .field("encryption_key", &"<redacted>")
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let encryption_key = lookup(ENV_ENCRYPTION_KEY)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingEncryptionKey)?;

        let host = match lookup(ENV_HOST) {
            Some(h) => h
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(h))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match lookup(ENV_PORT) {
            Some(p) => p.parse::<u16>().map_err(|_| ConfigError::InvalidPort(p))?,
            None => DEFAULT_PORT,
        };

        let database_path = lookup(ENV_DATABASE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            database_path,
            encryption_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[("ENCRYPTION_KEY", "secret")])).unwrap();
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
        assert!(config.bind_addr.ip().is_unspecified());
        assert_eq!(config.database_path, default_database_path());
        assert_eq!(config.encryption_key, "secret");
    }

    #[test]
    fn missing_or_empty_key_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEncryptionKey);
        let err = AppConfig::from_lookup(lookup_from(&[("ENCRYPTION_KEY", "")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEncryptionKey);
    }

    #[test]
    fn overrides_are_honoured() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ENCRYPTION_KEY", "secret"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("INTAKE_DATABASE_PATH", "/tmp/q.db"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_path, PathBuf::from("/tmp/q.db"));
    }

    #[test]
    fn bad_port_and_host_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("ENCRYPTION_KEY", "secret"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("eighty".into()));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("ENCRYPTION_KEY", "secret"),
            ("HOST", "not-an-ip"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidHost("not-an-ip".into()));
    }

    #[test]
    fn debug_output_hides_key() {
        let config = AppConfig::from_lookup(lookup_from(&[("ENCRYPTION_KEY", "hunter2")])).unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn database_path_under_app_data() {
        assert!(default_database_path().starts_with(app_data_dir()));
        assert!(app_data_dir().ends_with("Intake"));
    }
}
