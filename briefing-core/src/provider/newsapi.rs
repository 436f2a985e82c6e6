use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{config::NewsSettings, error::LookupError, model::NewsHeadline};

use super::{NewsProvider, http_client};

const PROVIDER: &str = "newsapi";

/// Client for the NewsAPI top-headlines endpoint.
#[derive(Debug, Clone)]
pub struct NewsApiProvider {
    api_key: String,
    settings: NewsSettings,
    http: Client,
}

impl NewsApiProvider {
    pub fn new(
        api_key: String,
        settings: NewsSettings,
        timeout_secs: Option<u64>,
    ) -> Result<Self, LookupError> {
        Ok(Self {
            api_key,
            settings,
            http: http_client(timeout_secs)?,
        })
    }
}

// NewsAPI error payloads ({"status":"error",...}) carry no `articles`
// and deserialize into an empty list.
#[derive(Debug, Deserialize)]
struct NaResponse {
    #[serde(default)]
    articles: Option<Vec<NaArticle>>,
}

#[derive(Debug, Deserialize)]
struct NaArticle {
    #[serde(default)]
    title: Option<String>,
}

fn headlines(parsed: NaResponse, limit: usize) -> Vec<NewsHeadline> {
    parsed
        .articles
        .unwrap_or_default()
        .into_iter()
        .take(limit)
        .map(|a| NewsHeadline {
            title: a.title.unwrap_or_default(),
        })
        .collect()
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    #[instrument(skip(self))]
    async fn top_headlines(&self) -> Result<Vec<NewsHeadline>, LookupError> {
        let url = format!("{}/top-headlines", self.settings.base_url.trim_end_matches('/'));
        let page_size = self.settings.page_size.to_string();

        debug!(country = %self.settings.country, "Requesting top headlines");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("country", self.settings.country.as_str()),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
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

        let parsed: NaResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::parse(PROVIDER, e))?;

        let items = headlines(parsed, self.settings.page_size);
        debug!(%status, count = items.len(), "Received headlines");

        Ok(items)
    }
}
