use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::model::WeatherSnapshot;

use super::{ProviderError, WeatherProvider};

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

/// One outbound call per lookup, bounded so an abandoned delayed query
/// cannot hang a host worker.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    http: Client,
}

impl OpenWeatherProvider {
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized, the same condition
    /// under which `reqwest::Client::new` panics. Falling back to a client
    /// without the request timeout is not an option here.
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to initialize the HTTP client");

        Self { http }
    }
}

impl Default for OpenWeatherProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(
        &self,
        city: &str,
        api_token: &str,
    ) -> Result<WeatherSnapshot, ProviderError> {
        let res = self
            .http
            .get(CURRENT_WEATHER_URL)
            .query(&[("q", city), ("appid", api_token), ("units", "metric")])
            .send()
            .await
            // The reqwest error may carry the request URL, and the URL
            // carries the token. Report a fixed phrase instead.
            .map_err(|err| {
                if err.is_timeout() {
                    ProviderError::Network("request timed out".to_string())
                } else {
                    ProviderError::Network("could not reach the weather service".to_string())
                }
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|_| ProviderError::Network("failed to read provider response".to_string()))?;

        if let Some(err) = classify_status(status, &body) {
            return Err(err);
        }

        snapshot_from_body(&body)
    }
}

/// Map a non-success status to its failure kind; `None` means success.
fn classify_status(status: StatusCode, body: &str) -> Option<ProviderError> {
    match status {
        StatusCode::NOT_FOUND => Some(ProviderError::NotFound),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Some(ProviderError::Unauthorized),
        s if !s.is_success() => Some(ProviderError::Network(format!(
            "provider returned status {s}: {}",
            truncate_body(body),
        ))),
        _ => None,
    }
}

fn snapshot_from_body(body: &str) -> Result<WeatherSnapshot, ProviderError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|_| ProviderError::Network("malformed provider response".to_string()))?;

    let (condition_title, condition_icon) = parsed
        .weather
        .first()
        .map(|w| (w.main.clone(), format!("{ICON_URL_BASE}/{}@2x.png", w.icon)))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

    Ok(WeatherSnapshot {
        city_name: parsed.name,
        // We request metric units, so the reading is Celsius as returned.
        temperature: format!("{:.0}°C", parsed.main.temp),
        condition_title,
        condition_icon,
    })
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // The cut must land on a char boundary or the slice below panics.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}...", &body[..cut])
}
