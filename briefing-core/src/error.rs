//! Error types shared by the lookup flows.

use thiserror::Error;

/// Failures of a lookup that never produced usable data.
///
/// Semantic "nothing found" answers are not errors; see
/// [`WeatherLookup`](crate::model::WeatherLookup).
#[derive(Debug, Error)]
pub enum LookupError {
    /// The request could not be sent or no response arrived.
    #[error("Request to {provider} failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read.
    #[error("Failed to read {provider} response body: {source}")]
    Body {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not JSON, or lacked fields the flow consumes.
    #[error("Failed to parse {provider} response: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },

    /// The client could not be built from configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl LookupError {
    pub(crate) fn parse(provider: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            provider,
            message: err.to_string(),
        }
    }
}

/// A counter element whose target literal is not a usable number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CounterError {
    #[error("Invalid counter target '{0}'")]
    InvalidTarget(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_mentions_provider_and_message() {
        let err = LookupError::parse("openweather", "expected value at line 1 column 1");
        let msg = err.to_string();

        assert!(msg.contains("openweather"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn invalid_target_display() {
        let err = CounterError::InvalidTarget("abc".to_string());
        assert_eq!(err.to_string(), "Invalid counter target 'abc'");
    }
}
