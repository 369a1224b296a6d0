//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Daily plan budget and size
//! - Log level
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::plan::PlanConfig;

const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
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
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(n) if n.is_u64() || n.is_i64() => {
                        let parsed = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                        serde_json::Value::Number(parsed.into())
                    }
                    serde_json::Value::Number(_) => {
                        let parsed = value
                            .parse::<f64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Number::from_f64(parsed)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(unknown());
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load from the data directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
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
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
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

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key, e.g. `plan.max_entries`.
    ///
    /// The value must parse as the existing field's type and pass
    /// validation; on error the config is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Dot-separated keys of every leaf setting.
    pub fn keys() -> Vec<String> {
        let mut keys = Vec::new();
        if let Ok(serde_json::Value::Object(sections)) = serde_json::to_value(Self::default()) {
            for (section, fields) in sections {
                if let serde_json::Value::Object(fields) = fields {
                    keys.extend(fields.keys().map(|f| format!("{section}.{f}")));
                }
            }
        }
        keys
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let budget = self.plan.daily_budget_hours;
        if !budget.is_finite() || budget <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "plan.daily_budget_hours".into(),
                message: format!("must be a positive number of hours, got {budget}"),
            });
        }
        if self.plan.max_entries == 0 {
            return Err(ConfigError::InvalidValue {
                key: "plan.max_entries".into(),
                message: "must be at least 1".into(),
            });
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".into(),
                message: format!("expected one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
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
        let parsed: Config = toml::from_str("[plan]\nmax_entries = 3\n").unwrap();
        assert_eq!(parsed.plan.max_entries, 3);
        assert_eq!(parsed.plan.daily_budget_hours, 5.0);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn get_known_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("plan.max_entries"), Some("8".to_string()));
        assert_eq!(cfg.get("plan.daily_budget_hours"), Some("5.0".to_string()));
        assert_eq!(cfg.get("logging.level"), Some("info".to_string()));
        assert_eq!(cfg.get("plan"), None);
        assert_eq!(cfg.get("plan.nope"), None);
        assert_eq!(cfg.get(""), None);
    }

    #[test]
    fn set_typechecks_and_validates() {
        let mut cfg = Config::default();
        cfg.set("plan.max_entries", "3").unwrap();
        cfg.set("plan.daily_budget_hours", "6.5").unwrap();
        cfg.set("logging.level", "debug").unwrap();
        assert_eq!(cfg.plan.max_entries, 3);
        assert_eq!(cfg.plan.daily_budget_hours, 6.5);
        assert_eq!(cfg.logging.level, "debug");

        let before = cfg.clone();
        assert!(matches!(cfg.set("plan.max_entries", "many"), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(cfg.set("plan.max_entries", "0"), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(cfg.set("plan.daily_budget_hours", "-1"), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(cfg.set("logging.level", "loud"), Err(ConfigError::InvalidValue { .. })));
        assert!(matches!(cfg.set("ui.dark_mode", "true"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(cfg.set("plan", "1"), Err(ConfigError::UnknownKey(_))));
        assert_eq!(cfg, before);
    }

    #[test]
    fn integer_budget_is_accepted_for_float_field() {
        let mut cfg = Config::default();
        cfg.set("plan.daily_budget_hours", "4").unwrap();
        assert_eq!(cfg.plan.daily_budget_hours, 4.0);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("plan.max_entries", "2").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().plan.max_entries, 2);
    }

    #[test]
    fn load_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[plan]\nmax_entries = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));
    }

    #[test]
    fn keys_lists_leaves() {
        let keys = Config::keys();
        assert!(keys.contains(&"plan.daily_budget_hours".to_string()));
        assert!(keys.contains(&"plan.max_entries".to_string()));
        assert!(keys.contains(&"logging.level".to_string()));
    }
}
