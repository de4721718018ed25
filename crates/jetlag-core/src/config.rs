//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Default origin/destination zones and flight duration
//! - HTTP server bind address
//!
//! Configuration is stored at `~/.config/jetlag/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, CoreError, Result};
use crate::plan::{validate_duration, ZoneId};

/// Defaults used when the user leaves a field blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_origin_zone")]
    pub origin_zone: String,
    #[serde(default = "default_dest_zone")]
    pub dest_zone: String,
    #[serde(default)]
    pub flight_duration_hours: f64,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/jetlag/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_origin_zone() -> String {
    "America/New_York".into()
}
fn default_dest_zone() -> String {
    "Europe/London".into()
}
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            origin_zone: default_origin_zone(),
            dest_zone: default_dest_zone(),
            flight_duration_hours: 0.0,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Returns `~/.config/jetlag[-dev]/` based on JETLAG_ENV.
///
/// Set JETLAG_ENV=dev to use development data directory.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("JETLAG_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("jetlag-dev")
    } else {
        base_dir.join("jetlag")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
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
    ) -> std::result::Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) => {
                        return Err(ConfigError::UnknownKey(key.to_string()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, creating it with defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
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

    /// Set a config value by key in memory. Returns error if key is unknown
    /// or the value does not fit the key's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate(key)?;
        *self = updated;
        Ok(())
    }

    /// Zone defaults must name IANA zones and the default duration must be a
    /// usable flight length.
    fn validate(&self, key: &str) -> Result<()> {
        let invalid = |e: CoreError| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        };
        ZoneId::parse(&self.defaults.origin_zone).map_err(invalid)?;
        ZoneId::parse(&self.defaults.dest_zone).map_err(invalid)?;
        validate_duration(self.defaults.flight_duration_hours).map_err(invalid)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
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
        assert_eq!(parsed.defaults.origin_zone, "America/New_York");
        assert_eq!(parsed.defaults.dest_zone, "Europe/London");
        assert_eq!(parsed.server.port, 8080);
    }

    #[test]
    fn partial_file_uses_field_defaults() {
        let parsed: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(parsed.server.port, 9000);
        assert_eq!(parsed.server.host, "0.0.0.0");
        assert_eq!(parsed.defaults.flight_duration_hours, 0.0);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("defaults.dest_zone").as_deref(), Some("Europe/London"));
        assert_eq!(cfg.get("server.port").as_deref(), Some("8080"));
        assert!(cfg.get("server.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("server.port", "3000").unwrap();
        cfg.set("defaults.origin_zone", "Asia/Tokyo").unwrap();
        cfg.set("defaults.flight_duration_hours", "11.5").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.defaults.origin_zone, "Asia/Tokyo");
        assert_eq!(cfg.defaults.flight_duration_hours, 11.5);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_types() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("server.nonexistent", "x"),
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(matches!(
            cfg.set("server", "x"),
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(matches!(
            cfg.set("server.port", "not_a_port"),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(cfg.set("server.port", "70000").is_err());
        assert_eq!(cfg.server.port, 8080);
    }

    #[test]
    fn set_rejects_unknown_zones_and_negative_duration() {
        let mut cfg = Config::default();
        let err = cfg.set("defaults.origin_zone", "Mars/Olympus").unwrap_err();
        match &err {
            CoreError::Config(ConfigError::InvalidValue { key, .. }) => {
                assert_eq!(key, "defaults.origin_zone")
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("Mars/Olympus"));
        assert!(cfg.set("defaults.dest_zone", "Nowhere").is_err());
        assert!(cfg.set("defaults.flight_duration_hours", "-3").is_err());
        assert_eq!(cfg.defaults.origin_zone, "America/New_York");
        assert_eq!(cfg.defaults.dest_zone, "Europe/London");
        assert_eq!(cfg.defaults.flight_duration_hours, 0.0);
    }

    #[test]
    fn load_from_creates_defaults_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.server.port, 8080);

        let mut cfg = cfg;
        cfg.set("defaults.dest_zone", "Asia/Tokyo").unwrap();
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.defaults.dest_zone, "Asia/Tokyo");
    }

    #[test]
    fn load_from_reports_parse_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }
}
