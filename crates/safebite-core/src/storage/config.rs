//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Defaults for the alertness form
//! - Whether logins are remembered
//! - Log filter and format for the CLI
//!
//! Configuration is stored at `~/.config/safebite/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::alertness::ActivityLevel;
use crate::error::ConfigError;

/// Defaults the alertness form starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertnessConfig {
    #[serde(default = "default_sleep_hours")]
    pub sleep_hours: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default = "default_stress_level")]
    pub stress_level: u8,
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Persist the signed-in user across runs unless `--no-remember` is given.
    #[serde(default = "default_true")]
    pub remember: bool,
}

/// Logging configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` overrides it.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/safebite/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alertness: AlertnessConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_sleep_hours() -> f64 {
    7.0
}
fn default_stress_level() -> u8 {
    5
}
fn default_true() -> bool {
    true
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for AlertnessConfig {
    fn default() -> Self {
        Self {
            sleep_hours: default_sleep_hours(),
            activity_level: ActivityLevel::default(),
            stress_level: default_stress_level(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { remember: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            value
                                .parse::<f64>()
                                .ok()
                                .and_then(serde_json::Number::from_f64)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file in the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Reject values the forms could never hold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=10).contains(&self.alertness.stress_level) {
            return Err(ConfigError::InvalidValue {
                key: "alertness.stress_level".into(),
                message: format!("{} is outside 1-10", self.alertness.stress_level),
            });
        }
        if !self.alertness.sleep_hours.is_finite() || self.alertness.sleep_hours < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "alertness.sleep_hours".into(),
                message: format!("{} is not a non-negative number", self.alertness.sleep_hours),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type or range.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from the data directory, falling back to defaults.
    ///
    /// The load error is handed back rather than logged so the caller can
    /// report it once logging is set up.
    pub fn load_or_default() -> (Self, Option<ConfigError>) {
        match Self::path() {
            Ok(path) => Self::load_from_or_default(&path),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn load_from_or_default(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::load_from(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[alertness]\nstress_level = 3\n").unwrap();
        assert_eq!(parsed.alertness.stress_level, 3);
        assert_eq!(parsed.alertness.sleep_hours, 7.0);
        assert!(parsed.session.remember);
        assert_eq!(parsed.logging.filter, "warn");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("session.remember").as_deref(), Some("true"));
        assert_eq!(cfg.get("alertness.stress_level").as_deref(), Some("5"));
        assert_eq!(cfg.get("alertness.activity_level").as_deref(), Some("moderate"));
        assert!(cfg.get("alertness.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.apply("session.remember", "false").unwrap();
        cfg.apply("alertness.stress_level", "8").unwrap();
        cfg.apply("alertness.sleep_hours", "6.5").unwrap();
        cfg.apply("alertness.activity_level", "active").unwrap();
        cfg.apply("logging.filter", "safebite_core=debug").unwrap();
        assert!(!cfg.session.remember);
        assert_eq!(cfg.alertness.stress_level, 8);
        assert_eq!(cfg.alertness.sleep_hours, 6.5);
        assert_eq!(cfg.alertness.activity_level, ActivityLevel::Active);
        assert_eq!(cfg.logging.filter, "safebite_core=debug");
    }

    #[test]
    fn apply_accepts_integer_for_float_field() {
        let mut cfg = Config::default();
        cfg.apply("alertness.sleep_hours", "8").unwrap();
        assert_eq!(cfg.alertness.sleep_hours, 8.0);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(cfg.apply("ui.dark_mode", "true"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(cfg.apply("alertness", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn apply_rejects_invalid_values_without_change() {
        let mut cfg = Config::default();
        assert!(cfg.apply("session.remember", "maybe").is_err());
        assert!(cfg.apply("alertness.stress_level", "11").is_err());
        assert!(cfg.apply("alertness.stress_level", "many").is_err());
        assert!(cfg.apply("alertness.activity_level", "extreme").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn load_from_rejects_out_of_range_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[alertness]\nstress_level = 42\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn load_or_default_hands_back_the_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[alertness]\nstress_level = 42\n").unwrap();

        let (cfg, err) = Config::load_from_or_default(&path);
        assert_eq!(cfg, Config::default());
        assert!(matches!(err, Some(ConfigError::InvalidValue { .. })));

        std::fs::write(&path, "[alertness]\nstress_level = 3\n").unwrap();
        let (cfg, err) = Config::load_from_or_default(&path);
        assert_eq!(cfg.alertness.stress_level, 3);
        assert!(err.is_none());
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("logging.json", "true").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }
}
