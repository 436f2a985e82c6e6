//! The briefing page: weather panel, news panel, counters and city search.
//!
//! Every flow renders into its own optional region. A missing region is
//! skipped silently, and no flow's failure reaches another flow.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::{
    counter::{self, CounterTarget},
    error::LookupError,
    model::{NewsHeadline, WeatherLookup, WeatherRequest},
    provider::{NewsProvider, WeatherProvider},
    view::{ListRegion, TextRegion},
};

pub const CITY_NOT_FOUND: &str = "City not found!";
pub const WEATHER_UNAVAILABLE: &str = "Weather data unavailable";
pub const NO_NEWS: &str = "No news available";
pub const NEWS_UNAVAILABLE: &str = "Unable to load news";

/// Text shown in the weather region for a lookup result.
pub fn weather_text(result: &Result<WeatherLookup, LookupError>) -> String {
    match result {
        Ok(WeatherLookup::Found(report)) => report.summary(),
        Ok(WeatherLookup::NotFound) => CITY_NOT_FOUND.to_string(),
        Err(_) => WEATHER_UNAVAILABLE.to_string(),
    }
}

/// Items shown in the news list for a lookup result.
pub fn news_items(result: &Result<Vec<NewsHeadline>, LookupError>) -> Vec<String> {
    match result {
        Ok(headlines) if headlines.is_empty() => vec![NO_NEWS.to_string()],
        Ok(headlines) => headlines.iter().map(|h| h.title.clone()).collect(),
        Err(_) => vec![NEWS_UNAVAILABLE.to_string()],
    }
}

/// Weather lookups rendered into one region.
///
/// Each lookup takes a generation number; a response is only rendered if
/// no later lookup was started in the meantime.
pub struct WeatherPanel {
    provider: Arc<dyn WeatherProvider>,
    region: Option<Arc<dyn TextRegion>>,
    default_city: String,
    generation: AtomicU64,
}

impl WeatherPanel {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        region: Option<Arc<dyn TextRegion>>,
        default_city: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            region,
            default_city: default_city.into(),
            generation: AtomicU64::new(0),
        }
    }

    /// Looks up `city` (or the default city) and renders the result.
    ///
    /// Returns the rendered text, or `None` when there is no region or the
    /// response was superseded by a newer lookup.
    pub async fn load(&self, city: Option<&str>) -> Option<String> {
        let request = WeatherRequest::new(city, &self.default_city);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.provider.get_weather(&request).await;
        if let Err(err) = &result {
            error!(city = %request.city, error = %err, "Weather fetch error");
        }

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(city = %request.city, generation, "Discarding superseded weather response");
            return None;
        }

        let region = self.region.as_ref()?;
        let text = weather_text(&result);
        region.set_text(&text);

        Some(text)
    }
}

/// Trending headlines rendered into one list.
pub struct NewsPanel {
    provider: Arc<dyn NewsProvider>,
    region: Option<Arc<dyn ListRegion>>,
}

impl NewsPanel {
    pub fn new(provider: Arc<dyn NewsProvider>, region: Option<Arc<dyn ListRegion>>) -> Self {
        Self { provider, region }
    }

    pub async fn load(&self) -> Option<Vec<String>> {
        let result = self.provider.top_headlines().await;
        if let Err(err) = &result {
            error!(error = %err, "News fetch error");
        }

        let region = self.region.as_ref()?;
        let items = news_items(&result);
        region.replace_items(&items);

        Some(items)
    }
}

/// An element that animates up to the number in its target literal.
#[derive(Clone)]
pub struct CounterElement {
    pub target: String,
    pub region: Arc<dyn TextRegion>,
}

impl CounterElement {
    pub fn new(target: impl Into<String>, region: Arc<dyn TextRegion>) -> Self {
        Self {
            target: target.into(),
            region,
        }
    }
}

/// Animates every counter concurrently and waits until all are done.
/// Counters with an unusable target are skipped.
pub async fn run_counters(counters: &[CounterElement]) {
    let mut tasks = JoinSet::new();

    for element in counters {
        let target: CounterTarget = match element.target.parse() {
            Ok(target) => target,
            Err(err) => {
                warn!(error = %err, "Skipping counter");
                continue;
            }
        };

        let region = Arc::clone(&element.region);
        tasks.spawn(async move { counter::animate(target, region.as_ref()).await });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined {
            error!(error = %err, "Counter animation task failed");
        }
    }
}

/// The city search form: a text input and a submit action.
#[derive(Debug, Default, Clone)]
pub struct CitySearch {
    input: String,
}

impl CitySearch {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Returns the trimmed city and clears the input. A blank input is left
    /// untouched and yields `None`.
    pub fn submit(&mut self) -> Option<String> {
        let city = self.input.trim();
        if city.is_empty() {
            return None;
        }

        let city = city.to_string();
        self.input.clear();
        Some(city)
    }
}

pub struct Page {
    weather: WeatherPanel,
    news: NewsPanel,
    counters: Vec<CounterElement>,
}

impl Page {
    pub fn new(weather: WeatherPanel, news: NewsPanel, counters: Vec<CounterElement>) -> Self {
        Self {
            weather,
            news,
            counters,
        }
    }

    /// Default-city weather, headlines and counters, all at once.
    pub async fn load(&self) {
        tokio::join!(
            self.weather.load(None),
            self.news.load(),
            run_counters(&self.counters),
        );
    }

    /// Handles a search submission. Returns whether a lookup was fired.
    pub async fn submit_search(&self, form: &mut CitySearch) -> bool {
        match form.submit() {
            Some(city) => {
                self.weather.load(Some(&city)).await;
                true
            }
            None => false,
        }
    }
}
