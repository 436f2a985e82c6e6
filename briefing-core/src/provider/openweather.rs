use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    config::WeatherSettings,
    error::LookupError,
    model::{WeatherLookup, WeatherReport, WeatherRequest},
};

use super::{WeatherProvider, http_client};

const PROVIDER: &str = "openweather";

/// Client for the OpenWeather current-weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    settings: WeatherSettings,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(
        api_key: String,
        settings: WeatherSettings,
        timeout_secs: Option<u64>,
    ) -> Result<Self, LookupError> {
        Ok(Self {
            api_key,
            settings,
            http: http_client(timeout_secs)?,
        })
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherLookup, LookupError> {
        let url = format!("{}/weather", self.settings.base_url.trim_end_matches('/'));

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.settings.units.as_str()),
            ])
            .send()
            .await
            .map_err(|source| LookupError::Request {
                provider: PROVIDER,
                source,
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| LookupError::Body {
                provider: PROVIDER,
                source,
            })?;

        let payload: Value =
            serde_json::from_str(&body).map_err(|e| LookupError::parse(PROVIDER, e))?;

        if !status.is_success() || !has_success_code(&payload) {
            debug!(%status, body = %truncate_body(&body), "OpenWeather reported no match");
            return Ok(WeatherLookup::NotFound);
        }

        let parsed: OwCurrentResponse =
            serde_json::from_value(payload).map_err(|e| LookupError::parse(PROVIDER, e))?;

        let condition = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| {
                LookupError::parse(PROVIDER, "response contained no weather conditions")
            })?;

        Ok(WeatherLookup::Found(WeatherReport {
            city: parsed.name,
            temperature_c: parsed.main.temp,
            condition,
            wind_speed_mps: parsed.wind.speed,
            humidity_pct: parsed.main.humidity,
            observed_at: parsed.dt.and_then(unix_to_utc),
        }))
    }
}

/// OpenWeather signals success with a numeric `cod` of 200; errors carry
/// string codes such as `"404"`.
fn has_success_code(payload: &Value) -> bool {
    payload.get("cod").and_then(Value::as_f64) == Some(200.0)
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self, request), fields(city = %request.city))]
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherLookup, LookupError> {
        debug!("Requesting current weather");
        self.fetch_current(&request.city).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
