use std::sync::Arc;

use anyhow::Context;
use briefing_core::{
    CitySearch, Config, CounterElement, ListRegion, NewsPanel, Page, ProviderId, TextRegion,
    WeatherLookup, WeatherPanel, WeatherRequest, page,
    provider::{news_provider_from_config, weather_provider_from_config},
};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use tracing::error;

use crate::terminal::{CounterBoard, TerminalList, TerminalText};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "briefing",
    version,
    about = "Weather, headlines and counters in your terminal"
)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key of a provider.
    Configure {
        /// Provider short name: "openweather" or "newsapi".
        provider: String,
    },

    /// Show the current weather for a city.
    Weather {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the top headlines.
    News,

    /// Animate counters up to the given targets.
    Counters {
        /// Target numbers, e.g. `50 7.5 2500`.
        #[arg(required = true, allow_hyphen_values = true)]
        targets: Vec<String>,
    },

    /// Load the whole page, then search for cities interactively.
    Page {
        /// Counter target shown on the page; repeatable.
        #[arg(long = "counter")]
        counters: Vec<String>,
    },
}

pub const fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config() -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    config.apply_env();
    Ok(config)
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider)?,
            Command::Weather { city, json } => show_weather(city.as_deref(), json).await?,
            Command::News => show_news().await?,
            Command::Counters { targets } => show_counters(&targets).await,
            Command::Page { counters } => show_page(&counters).await?,
        }

        Ok(())
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.upsert_provider_api_key(id, api_key.trim().to_string());
    config.save()?;

    println!("Saved {id} credentials to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show_weather(city: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = load_config()?;
    let provider = weather_provider_from_config(&config)?;

    if json {
        let request = WeatherRequest::new(city, &config.weather.default_city);
        match provider.get_weather(&request).await {
            Ok(WeatherLookup::Found(report)) => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            other => {
                if let Err(err) = &other {
                    error!(error = %err, "Weather fetch error");
                }
                println!("{}", page::weather_text(&other));
            }
        }
        return Ok(());
    }

    let region: Arc<dyn TextRegion> = Arc::new(TerminalText::new("Weather"));
    WeatherPanel::new(provider, Some(region), config.weather.default_city)
        .load(city)
        .await;

    Ok(())
}

async fn show_news() -> anyhow::Result<()> {
    let config = load_config()?;
    let provider = news_provider_from_config(&config)?;

    let region: Arc<dyn ListRegion> = Arc::new(TerminalList::new("Trending news"));
    NewsPanel::new(provider, Some(region)).load().await;

    Ok(())
}

fn counter_elements(board: &Arc<CounterBoard>, targets: &[String]) -> Vec<CounterElement> {
    targets
        .iter()
        .zip(board.slots())
        .map(|(target, slot)| CounterElement::new(target.as_str(), slot))
        .collect()
}

async fn show_counters(targets: &[String]) {
    let board = CounterBoard::new(targets.len());
    page::run_counters(&counter_elements(&board, targets)).await;
    board.finish();
}

async fn show_page(counters: &[String]) -> anyhow::Result<()> {
    let config = load_config()?;
    let weather = weather_provider_from_config(&config)?;
    let news = news_provider_from_config(&config)?;

    let board = CounterBoard::new(counters.len());
    let weather_region: Arc<dyn TextRegion> =
        Arc::new(TerminalText::new("Weather").with_board(Arc::clone(&board)));
    let news_region: Arc<dyn ListRegion> =
        Arc::new(TerminalList::new("Trending news").with_board(Arc::clone(&board)));

    let page = Page::new(
        WeatherPanel::new(weather, Some(weather_region), config.weather.default_city.clone()),
        NewsPanel::new(news, Some(news_region)),
        counter_elements(&board, counters),
    );

    page.load().await;
    if !counters.is_empty() {
        board.finish();
    }

    let mut form = CitySearch::default();
    loop {
        let initial = form.input().to_string();
        let answer = tokio::task::spawn_blocking(move || {
            Text::new("City:")
                .with_help_message("Enter to search, Esc to quit")
                .with_initial_value(&initial)
                .prompt()
        })
        .await
        .context("City prompt task failed")?;

        match answer {
            Ok(value) => {
                form.set_input(value);
                page.submit_search(&mut form).await;
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        }
    }

    Ok(())
}
