use serde::{Deserialize, Serialize};

/// Normalized current-conditions snapshot produced by a provider.
///
/// `temperature` keeps the provider's own rendering (value plus unit
/// suffix); this crate never converts units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city_name: String,
    pub temperature: String,
    pub condition_title: String,
    pub condition_icon: String,
}

/// One line item handed back to the launcher for display.
///
/// `icon` may be left empty by the engine for error results; the host
/// adapter substitutes its current themed icon before display. `title`
/// is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    pub actionable: bool,
}

impl ResultRecord {
    pub fn actionable(title: String, subtitle: String, icon: String) -> Self {
        Self { title, subtitle, icon, actionable: true }
    }

    pub fn informational(title: String, subtitle: String) -> Self {
        Self { title, subtitle, icon: String::new(), actionable: false }
    }
}
