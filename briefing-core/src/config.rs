use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::{model::DEFAULT_CITY, provider::ProviderId};

/// Credentials for a single provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Settings of the weather lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSettings {
    /// City shown on page load.
    #[serde(default = "default_city")]
    pub default_city: String,

    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// OpenWeather unit system; temperatures are rendered as °C.
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            base_url: default_weather_base_url(),
            units: default_units(),
        }
    }
}

/// Settings of the trending-news lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSettings {
    #[serde(default = "default_country")]
    pub country: String,

    /// Number of headlines requested and shown.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_news_base_url")]
    pub base_url: String,
}

fn default_country() -> String {
    "us".to_string()
}

const fn default_page_size() -> usize {
    3
}

fn default_news_base_url() -> String {
    "https://newsapi.org/v2".to_string()
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            country: default_country(),
            page_size: default_page_size(),
            base_url: default_news_base_url(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    #[serde(default)]
    pub weather: WeatherSettings,

    #[serde(default)]
    pub news: NewsSettings,

    /// Transport timeout; unset means the HTTP client's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
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

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
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
        let dirs = ProjectDirs::from("dev", "briefing", "briefing")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override stored API keys with `OPENWEATHER_API_KEY` / `NEWS_API_KEY`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for id in ProviderId::all() {
            if let Some(key) = lookup(id.env_var()).filter(|k| !k.trim().is_empty()) {
                self.upsert_provider_api_key(*id, key);
            }
        }
    }

    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_behaviour() {
        let cfg = Config::default();

        assert_eq!(cfg.weather.default_city, "New York");
        assert_eq!(cfg.weather.units, "metric");
        assert_eq!(cfg.news.country, "us");
        assert_eq!(cfg.news.page_size, 3);
        assert!(cfg.timeout_secs.is_none());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg = Config::from_toml(
            r#"
            [providers.openweather]
            api_key = "OPEN_KEY"

            [news]
            country = "gb"
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeather), Some("OPEN_KEY"));
        assert!(!cfg.is_provider_configured(ProviderId::NewsApi));
        assert_eq!(cfg.news.country, "gb");
        assert_eq!(cfg.news.page_size, 3);
        assert_eq!(cfg.weather.base_url, "https://api.openweathermap.org/data/2.5");
    }

    #[test]
    fn toml_roundtrip_keeps_keys() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::NewsApi, "NEWS_KEY".into());
        cfg.timeout_secs = Some(5);

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back = Config::from_toml(&text).expect("parse");

        assert_eq!(back.provider_api_key(ProviderId::NewsApi), Some("NEWS_KEY"));
        assert_eq!(back.timeout_secs, Some(5));
    }

    #[test]
    fn env_overrides_replace_file_keys() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "FROM_FILE".into());

        cfg.apply_overrides(|name| match name {
            "OPENWEATHER_API_KEY" => Some("FROM_ENV".to_string()),
            "NEWS_API_KEY" => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeather), Some("FROM_ENV"));
        assert!(!cfg.is_provider_configured(ProviderId::NewsApi));
    }

    #[test]
    fn invalid_toml_is_reported() {
        let err = Config::from_toml("providers = 3").unwrap_err();
        assert!(err.to_string().contains("Invalid configuration TOML"));
    }
}
