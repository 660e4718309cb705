use crate::model::WeatherSnapshot;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Failure kinds a provider can surface. One attempt per call; retrying,
/// if ever wanted, belongs to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider does not recognize the requested city.
    #[error("city not recognized by the weather provider")]
    NotFound,

    /// The provider rejected the API token.
    #[error("weather provider rejected the API token")]
    Unauthorized,

    /// Transport-level failure: timeout, connection refused, unexpected
    /// status, malformed response. The message never contains the token.
    #[error("weather lookup failed: {0}")]
    Network(String),
}

/// Abstraction over the external weather service.
///
/// The API token is a per-call parameter because the host can replace it
/// at any time through the settings path. Callers guarantee `city` is
/// non-empty.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        city: &str,
        api_token: &str,
    ) -> Result<WeatherSnapshot, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_short_and_token_free() {
        let errs = [
            ProviderError::NotFound,
            ProviderError::Unauthorized,
            ProviderError::Network("request timed out".into()),
        ];

        for err in errs {
            let msg = err.to_string();
            assert!(!msg.is_empty());
            assert!(!msg.contains("appid"));
        }
    }
}
