use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    config::ConfigStore,
    model::ResultRecord,
    provider::{ProviderError, WeatherProvider},
};

/// Static description shown by the launcher, and reused as the subtitle of
/// token-related error results.
pub const PLUGIN_DESCRIPTION: &str = "Shows current weather conditions for a city";

/// Fixed title for the configuration-error result. Also used when the
/// provider reports the token as invalid, since the remedy is the same.
pub const MISSING_TOKEN_TITLE: &str = "OpenWeatherMap - Missing API Token";

const NOT_FOUND_TITLE: &str = "City not found";
const LOOKUP_FAILED_TITLE: &str = "Weather lookup failed";

/// The launcher queries twice: once per keystroke (immediate) and once
/// after input settles (delayed). Only the delayed phase may touch the
/// network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Immediate,
    Delayed,
}

/// Turns a free-text query into result records: resolves the target city,
/// performs the lookup in the delayed phase, and folds every failure into
/// a displayable record. Holds no per-query state, so an abandoned delayed
/// call has no observable side effect.
#[derive(Debug)]
pub struct QueryEngine {
    config: Arc<ConfigStore>,
    provider: Arc<dyn WeatherProvider>,
}

impl QueryEngine {
    pub fn new(config: Arc<ConfigStore>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { config, provider }
    }

    pub async fn handle_query(&self, raw: &str, phase: QueryPhase) -> Vec<ResultRecord> {
        let api_token = match self.config.api_token() {
            Some(token) if !token.is_empty() => token,
            _ => return vec![token_error_result()],
        };

        let Some(city) = resolve_city(raw, self.config.default_city()) else {
            return Vec::new();
        };

        if phase == QueryPhase::Immediate {
            return Vec::new();
        }

        match self.provider.fetch_current(&city, &api_token).await {
            Ok(snapshot) => vec![ResultRecord::actionable(
                format!("{} in {}", snapshot.temperature, snapshot.city_name),
                snapshot.condition_title,
                snapshot.condition_icon,
            )],
            Err(ProviderError::NotFound) => {
                debug!(%city, "provider did not recognize the city");
                vec![ResultRecord::informational(
                    NOT_FOUND_TITLE.to_string(),
                    format!("No weather data for \"{city}\""),
                )]
            }
            Err(ProviderError::Unauthorized) => {
                warn!("provider rejected the configured API token");
                vec![token_error_result()]
            }
            Err(ProviderError::Network(diagnostic)) => {
                warn!(%city, %diagnostic, "weather lookup failed");
                vec![ResultRecord::informational(LOOKUP_FAILED_TITLE.to_string(), diagnostic)]
            }
        }
    }
}

fn token_error_result() -> ResultRecord {
    ResultRecord::informational(MISSING_TOKEN_TITLE.to_string(), PLUGIN_DESCRIPTION.to_string())
}

/// Typed text wins over the default city; whitespace-only input counts as
/// empty. `None` means there is nothing to look up.
fn resolve_city(raw: &str, default_city: Option<String>) -> Option<String> {
    let typed = raw.trim();
    if !typed.is_empty() {
        return Some(typed.to_string());
    }

    default_city.map(|city| city.trim().to_string()).filter(|city| !city.is_empty())
}
