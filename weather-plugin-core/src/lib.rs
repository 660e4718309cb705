//! Core library for the launcher weather plugin.
//!
//! This crate defines:
//! - In-memory settings shared with the host (API token, default city)
//! - Abstraction over the external weather provider
//! - The query engine that turns free text into displayable results
//!
//! It is used by `weather-plugin`, the host-facing adapter, but carries no
//! launcher-specific types itself.

pub mod config;
pub mod engine;
pub mod model;
pub mod provider;

pub use config::ConfigStore;
pub use engine::{MISSING_TOKEN_TITLE, PLUGIN_DESCRIPTION, QueryEngine, QueryPhase};
pub use model::{ResultRecord, WeatherSnapshot};
pub use provider::{ProviderError, WeatherProvider, openweather::OpenWeatherProvider};
