//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the database path
pub const DATABASE_ENV: &str = "EMPTRACK_DATABASE";

/// Environment variable overriding the log level
pub const LOG_ENV: &str = "EMPTRACK_LOG";

/// Employee tracker configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file (`:memory:` for a throwaway store)
    pub database: Option<PathBuf>,

    /// Log level for diagnostics on stderr (error, warn, info, debug, trace)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (resolved lazily in the accessors)

        // 2. Global user config (~/.config/emptrack/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Environment variables
        config.merge(Self::from_env(|key| std::env::var(key).ok()));

        config
    }

    /// Read one config file, skipping it if missing or malformed
    pub fn read_file(path: &Path) -> Option<Config> {
        let contents = std::fs::read_to_string(path).ok()?;
        serde_yml::from_str::<Config>(&contents).ok()
    }

    /// Build the environment layer from a variable lookup
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Config {
        Config {
            database: lookup(DATABASE_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            log_level: lookup(LOG_ENV).filter(|v| !v.is_empty()),
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "emptrack")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
    }

    /// Database path, falling back to the platform data directory
    pub fn database(&self) -> PathBuf {
        if let Some(ref path) = self.database {
            return path.clone();
        }

        directories::ProjectDirs::from("", "", "emptrack")
            .map(|dirs| dirs.data_dir().join("employees.db"))
            .unwrap_or_else(|| PathBuf::from("employees.db"))
    }

    /// Maximum log level, falling back to `warn` on missing or unknown values
    pub fn log_level(&self) -> tracing::Level {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(tracing::Level::WARN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_env_layer_overrides_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "database: /srv/file.db\nlog_level: info\n").unwrap();

        let mut config = Config::default();
        config.merge(Config::read_file(&path).unwrap());
        assert_eq!(config.database(), PathBuf::from("/srv/file.db"));
        assert_eq!(config.log_level(), tracing::Level::INFO);

        config.merge(Config::from_env(|key| match key {
            DATABASE_ENV => Some("/tmp/env.db".to_string()),
            _ => None,
        }));
        assert_eq!(config.database(), PathBuf::from("/tmp/env.db"));
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "database: [unterminated").unwrap();

        assert!(Config::read_file(&path).is_none());
        assert!(Config::read_file(&tmp.path().join("missing.yaml")).is_none());
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let config = Config::from_env(|_| Some(String::new()));
        assert!(config.database.is_none());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_log_level_defaults() {
        let mut config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::WARN);

        config.log_level = Some("debug".to_string());
        assert_eq!(config.log_level(), tracing::Level::DEBUG);

        config.log_level = Some("loud".to_string());
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_default_database_path() {
        let config = Config::default();
        assert!(config.database().ends_with("employees.db"));
    }
}
