use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::extract::DEFAULT_MODEL;

/// External services that need a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Gemini,
    OpenWeather,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Gemini => "gemini",
            ServiceId::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::Gemini, ServiceId::OpenWeather]
    }

    /// Environment variable that overrides the stored key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ServiceId::Gemini => "GEMINI_API_KEY",
            ServiceId::OpenWeather => "OPENWEATHER_API_KEY",
        }
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "gemini" => Ok(ServiceId::Gemini),
            "openweather" => Ok(ServiceId::OpenWeather),
            _ => Err(anyhow!(
                "Unknown service '{value}'. Supported services: gemini, openweather."
            )),
        }
    }
}

/// Credentials for a single service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_key: String,

    /// Model name; only read for `gemini`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [services.openweather]
    /// api_key = "..."
    #[serde(default)]
    pub services: HashMap<String, ServiceConfig>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-chat", "weather-chat")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies `GEMINI_API_KEY` / `OPENWEATHER_API_KEY` from the environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        for &id in ServiceId::all() {
            if let Some(key) = lookup(id.env_var()).filter(|k| !k.trim().is_empty()) {
                self.upsert_service_api_key(id, key);
            }
        }
        self
    }

    /// Set or replace a service API key, keeping any other settings.
    pub fn upsert_service_api_key(&mut self, id: ServiceId, api_key: String) {
        self.services
            .entry(id.as_str().to_string())
            .and_modify(|cfg| cfg.api_key = api_key.clone())
            .or_insert(ServiceConfig { api_key, model: None });
    }

    /// Returns API key for a service, if present.
    pub fn service_api_key(&self, id: ServiceId) -> Option<&str> {
        self.services.get(id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_service_configured(&self, id: ServiceId) -> bool {
        self.service_api_key(id).is_some()
    }

    /// Like [`Self::service_api_key`], with a hint when the key is missing.
    pub fn require_api_key(&self, id: ServiceId) -> Result<&str> {
        self.service_api_key(id).ok_or_else(|| {
            anyhow!(
                "No API key configured for service '{id}'.\n\
                 Hint: run `weather-chat configure {id}` or set {}.",
                id.env_var()
            )
        })
    }

    /// Language model used for city extraction.
    pub fn model_name(&self) -> &str {
        self.services
            .get(ServiceId::Gemini.as_str())
            .and_then(|cfg| cfg.model.as_deref())
            .unwrap_or(DEFAULT_MODEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_id_as_str_roundtrip() {
        for id in ServiceId::all() {
            let parsed = ServiceId::try_from(id.as_str()).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
        assert_eq!(ServiceId::try_from("GEMINI").unwrap(), ServiceId::Gemini);
    }

    #[test]
    fn unknown_service_error() {
        let err = ServiceId::try_from("weatherapi").unwrap_err();
        assert!(err.to_string().contains("Unknown service"));
    }

    #[test]
    fn require_api_key_errors_with_hint() {
        let cfg = Config::default();
        let msg = cfg.require_api_key(ServiceId::OpenWeather).unwrap_err().to_string();

        assert!(msg.contains("No API key configured for service 'openweather'"));
        assert!(msg.contains("weather-chat configure openweather"));
        assert!(msg.contains("OPENWEATHER_API_KEY"));
    }

    #[test]
    fn upsert_sets_and_replaces_keys() {
        let mut cfg = Config::default();

        cfg.upsert_service_api_key(ServiceId::Gemini, "G1".into());
        cfg.upsert_service_api_key(ServiceId::OpenWeather, "OW".into());
        cfg.upsert_service_api_key(ServiceId::Gemini, "G2".into());

        assert_eq!(cfg.service_api_key(ServiceId::Gemini), Some("G2"));
        assert_eq!(cfg.require_api_key(ServiceId::OpenWeather).unwrap(), "OW");
        assert!(cfg.is_service_configured(ServiceId::Gemini));
    }

    #[test]
    fn model_defaults_and_survives_key_update() {
        let cfg: Config = toml::from_str(
            r#"
            [services.gemini]
            api_key = "G"
            model = "gemini-2.0-flash"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.model_name(), "gemini-2.0-flash");

        let mut cfg = cfg;
        cfg.upsert_service_api_key(ServiceId::Gemini, "G2".into());
        assert_eq!(cfg.model_name(), "gemini-2.0-flash");

        assert_eq!(Config::default().model_name(), DEFAULT_MODEL);
    }

    #[test]
    fn env_overrides_take_precedence_and_skip_blank_values() {
        let mut cfg = Config::default();
        cfg.upsert_service_api_key(ServiceId::Gemini, "FILE".into());

        let cfg = cfg.with_overrides(|name| match name {
            "GEMINI_API_KEY" => Some("ENV".into()),
            "OPENWEATHER_API_KEY" => Some("  ".into()),
            _ => None,
        });

        assert_eq!(cfg.service_api_key(ServiceId::Gemini), Some("ENV"));
        assert!(!cfg.is_service_configured(ServiceId::OpenWeather));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.upsert_service_api_key(ServiceId::OpenWeather, "OW".into());

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();

        assert_eq!(back.service_api_key(ServiceId::OpenWeather), Some("OW"));
    }
}
