//! Core library for the `briefing` page.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Weather and news provider clients
//! - The counter animation as a lazy frame sequence
//! - View handles and the page flows that render into them
//!
//! It is used by `briefing-cli`, but any front end implementing the
//! [`view`] traits can host the page.

pub mod config;
pub mod counter;
pub mod error;
pub mod model;
pub mod page;
pub mod provider;
pub mod view;

pub use config::{Config, NewsSettings, ProviderConfig, WeatherSettings};
pub use counter::{CounterFrame, CounterFrames, CounterTarget};
pub use error::{CounterError, LookupError};
pub use model::{NewsHeadline, WeatherLookup, WeatherReport, WeatherRequest};
pub use page::{CitySearch, CounterElement, NewsPanel, Page, WeatherPanel};
pub use provider::{NewsProvider, ProviderId, WeatherProvider};
pub use view::{ListRegion, TextRegion};
