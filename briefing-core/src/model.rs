use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// City used when no (or a blank) city is requested.
pub const DEFAULT_CITY: &str = "New York";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub city: String,
}

impl WeatherRequest {
    /// Build a request, falling back to `default_city` when `city` is absent or blank.
    pub fn new(city: Option<&str>, default_city: &str) -> Self {
        let city = match city.map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => default_city,
        };

        Self {
            city: city.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
    pub wind_speed_mps: f64,
    pub humidity_pct: u8,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherReport {
    /// Multi-line summary written into the weather region.
    pub fn summary(&self) -> String {
        format!(
            "{}: {}°C, {}\n💨 Wind: {} m/s\n💧 Humidity: {}%",
            self.city, self.temperature_c, self.condition, self.wind_speed_mps, self.humidity_pct,
        )
    }
}

/// Outcome of a weather lookup that got a JSON answer from the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherLookup {
    Found(WeatherReport),
    /// Non-success status, or a payload without the success indicator.
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsHeadline {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> WeatherReport {
        WeatherReport {
            city: "London".to_string(),
            temperature_c: 12.5,
            condition: "light rain".to_string(),
            wind_speed_mps: 4.1,
            humidity_pct: 81,
            observed_at: None,
        }
    }

    #[test]
    fn request_uses_default_city_when_missing_or_blank() {
        assert_eq!(WeatherRequest::new(None, DEFAULT_CITY).city, "New York");
        assert_eq!(WeatherRequest::new(Some("   "), DEFAULT_CITY).city, "New York");
        assert_eq!(WeatherRequest::new(Some(" Paris "), DEFAULT_CITY).city, "Paris");
    }

    #[test]
    fn summary_lists_all_fields() {
        assert_eq!(
            report().summary(),
            "London: 12.5°C, light rain\n💨 Wind: 4.1 m/s\n💧 Humidity: 81%"
        );
    }

    #[test]
    fn summary_prints_whole_temperatures_without_fraction() {
        let mut r = report();
        r.temperature_c = 20.0;
        r.wind_speed_mps = 3.0;

        assert!(r.summary().starts_with("London: 20°C, light rain"));
        assert!(r.summary().contains("Wind: 3 m/s"));
    }
}
