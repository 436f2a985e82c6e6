use crate::{
    Config, NewsHeadline, WeatherLookup, WeatherRequest,
    error::LookupError,
    provider::{newsapi::NewsApiProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use reqwest::Client;
use std::{convert::TryFrom, fmt::Debug, sync::Arc, time::Duration};

pub mod newsapi;
pub mod openweather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    NewsApi,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::NewsApi => "newsapi",
        }
    }

    /// Environment variable that overrides the stored API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "OPENWEATHER_API_KEY",
            ProviderId::NewsApi => "NEWS_API_KEY",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::NewsApi]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "newsapi" => Ok(ProviderId::NewsApi),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, newsapi."
            )),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherLookup, LookupError>;
}

#[async_trait]
pub trait NewsProvider: Send + Sync + Debug {
    /// Top headlines, at most the configured page size. Empty when the
    /// provider answered without articles.
    async fn top_headlines(&self) -> Result<Vec<NewsHeadline>, LookupError>;
}

pub(crate) fn http_client(timeout_secs: Option<u64>) -> Result<Client, LookupError> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().map_err(|e| LookupError::Configuration(e.to_string()))
}

fn api_key(config: &Config, id: ProviderId) -> anyhow::Result<String> {
    config.provider_api_key(id).map(str::to_owned).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `briefing configure {id}` or set {}.",
            id.env_var()
        )
    })
}

/// Construct the weather provider from config.
pub fn weather_provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let key = api_key(config, ProviderId::OpenWeather)?;
    let provider =
        OpenWeatherProvider::new(key, config.weather.clone(), config.timeout_secs)?;

    Ok(Arc::new(provider))
}

/// Construct the news provider from config.
pub fn news_provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn NewsProvider>> {
    let key = api_key(config, ProviderId::NewsApi)?;
    let provider = NewsApiProvider::new(key, config.news.clone(), config.timeout_secs)?;

    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn provider_id_is_case_insensitive() {
        assert_eq!(ProviderId::try_from("NewsAPI").unwrap(), ProviderId::NewsApi);
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn weather_provider_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = weather_provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured for provider 'openweather'"));
        assert!(msg.contains("OPENWEATHER_API_KEY"));
    }

    #[test]
    fn news_provider_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = news_provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("briefing configure newsapi"));
    }

    #[test]
    fn providers_build_when_configured() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "KEY".to_string());
        cfg.upsert_provider_api_key(ProviderId::NewsApi, "KEY".to_string());

        assert!(weather_provider_from_config(&cfg).is_ok());
        assert!(news_provider_from_config(&cfg).is_ok());
    }
}
