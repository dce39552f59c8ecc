use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::scorecard::JsonFileConfigStore;

pub const DEFAULT_DATA_DIR: &str = ".property-scorer";
pub const DEFAULT_CONFIG_KEY: &str = "property-scorer-config";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application shell.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = env::var("SCORER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        let config_key =
            env::var("SCORER_CONFIG_KEY").unwrap_or_else(|_| DEFAULT_CONFIG_KEY.to_string());
        validate_key(&config_key)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig {
                data_dir,
                config_key,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn validate_key(key: &str) -> Result<(), ConfigError> {
    let trimmed = key.trim();
    if trimmed.is_empty() || trimmed != key {
        return Err(ConfigError::InvalidConfigKey {
            key: key.to_string(),
        });
    }
    if key.contains(['/', '\\']) || key == "." || key == ".." {
        return Err(ConfigError::InvalidConfigKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Where the user's rubric is kept between runs.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub config_key: String,
}

impl StorageConfig {
    pub fn store(&self) -> JsonFileConfigStore {
        JsonFileConfigStore::new(self.data_dir.clone(), self.config_key.clone())
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidConfigKey { key: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidConfigKey { key } => write!(
                f,
                "SCORER_CONFIG_KEY '{key}' must be non-empty with no surrounding whitespace or path separators"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("SCORER_DATA_DIR");
        env::remove_var("SCORER_CONFIG_KEY");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.storage.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.storage.config_key, DEFAULT_CONFIG_KEY);
        assert_eq!(config.telemetry.log_level, "warn");
    }

    #[test]
    fn storage_settings_come_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("SCORER_DATA_DIR", "/tmp/scorer-data");
        env::set_var("SCORER_CONFIG_KEY", "family-rubric");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Test);
        let store = config.storage.store();
        assert_eq!(store.key(), "family-rubric");
        assert_eq!(
            store.path(),
            PathBuf::from("/tmp/scorer-data").join("family-rubric.json")
        );
    }

    #[test]
    fn rejects_keys_that_escape_the_data_dir() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SCORER_CONFIG_KEY", "../elsewhere");
        let result = AppConfig::load();
        reset_env();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidConfigKey { ref key }) if key == "../elsewhere"
        ));
    }

    #[test]
    fn rejects_blank_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("  ").is_err());
        assert!(validate_key(" padded ").is_err());
        assert!(validate_key("property-scorer-config").is_ok());
    }
}
