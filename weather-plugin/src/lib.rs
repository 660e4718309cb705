//! Launcher-facing adapter around `weather-plugin-core`.
//!
//! This crate owns everything the host interacts with directly:
//! - plugin identity (name, description, themed icon)
//! - the two-phase query entry point
//! - the settings-update path
//! - theme-changed subscription and idempotent teardown

use std::sync::{
    Arc, Mutex, RwLock,
    atomic::{AtomicBool, Ordering},
};

use tracing::{debug, info};
use weather_plugin_core::{
    ConfigStore, OpenWeatherProvider, QueryEngine, QueryPhase, ResultRecord, WeatherProvider,
};

pub mod theme;

pub use theme::{ListenerId, Theme, ThemeListeners, icon_for_theme};

pub const PLUGIN_NAME: &str = "Weather";

/// The plugin object held by the launcher for its whole lifetime.
///
/// Queries and settings updates may arrive on different host threads; all
/// shared state lives behind the config store's own lock or the icon lock.
#[derive(Debug)]
pub struct WeatherPlugin {
    config: Arc<ConfigStore>,
    engine: QueryEngine,
    icon: Arc<RwLock<&'static str>>,
    listener: Mutex<Option<ListenerId>>,
    disposed: AtomicBool,
}

impl WeatherPlugin {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let config = Arc::new(ConfigStore::new());
        let engine = QueryEngine::new(Arc::clone(&config), provider);

        Self {
            config,
            engine,
            icon: Arc::new(RwLock::new(theme::DARK_ICON)),
            listener: Mutex::new(None),
            disposed: AtomicBool::new(false),
        }
    }

    /// Plugin wired to the real OpenWeather provider.
    pub fn openweather() -> Self {
        Self::new(Arc::new(OpenWeatherProvider::new()))
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn description(&self) -> &'static str {
        weather_plugin_core::PLUGIN_DESCRIPTION
    }

    /// Seed the icon from the current theme and subscribe to changes.
    pub fn init(&self, listeners: &ThemeListeners, current_theme: Theme) {
        self.set_icon(current_theme);

        let icon = Arc::clone(&self.icon);
        let id = listeners.register(Box::new(move |new_theme| {
            *icon.write().unwrap_or_else(std::sync::PoisonError::into_inner) =
                icon_for_theme(new_theme);
        }));

        *self.listener.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(id);
    }

    /// Host entry point for both query phases. Records the core left
    /// icon-less (error results) get the current themed icon.
    pub async fn query(&self, raw: &str, delayed: bool) -> Vec<ResultRecord> {
        let phase = if delayed { QueryPhase::Delayed } else { QueryPhase::Immediate };

        let mut results = self.engine.handle_query(raw, phase).await;

        let icon = self.current_icon();
        for record in &mut results {
            if record.icon.is_empty() {
                record.icon = icon.to_string();
            }
        }

        results
    }

    /// Called by the host settings layer. Replaces both values as a pair;
    /// the token itself is never logged.
    pub fn update_settings(&self, api_token: Option<String>, default_city: Option<String>) {
        info!(
            token_configured = api_token.as_deref().is_some_and(|t| !t.is_empty()),
            default_city = default_city.as_deref().unwrap_or(""),
            "plugin settings updated"
        );
        self.config.update(api_token, default_city);
    }

    /// Host asked for a data reload; only the icon depends on host state.
    pub fn reload(&self, current_theme: Theme) {
        self.set_icon(current_theme);
    }

    pub fn current_icon(&self) -> &'static str {
        *self.icon.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Idempotent teardown: the first call unsubscribes the theme
    /// listener, later calls do nothing.
    pub fn dispose(&self, listeners: &ThemeListeners) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Some(id) = self.listener.lock().unwrap_or_else(std::sync::PoisonError::into_inner).take()
        {
            listeners.unregister(id);
            debug!("theme listener unregistered");
        }
    }

    fn set_icon(&self, theme: Theme) {
        *self.icon.write().unwrap_or_else(std::sync::PoisonError::into_inner) =
            icon_for_theme(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_plugin_core::MISSING_TOKEN_TITLE;

    fn plugin() -> WeatherPlugin {
        // The real provider is never reached by these tests; every path
        // exercised here stops at the configuration gate.
        WeatherPlugin::openweather()
    }

    #[tokio::test]
    async fn missing_token_result_carries_the_themed_icon() {
        let listeners = ThemeListeners::new();
        let plugin = plugin();
        plugin.init(&listeners, Theme::Light);

        let results = plugin.query("Paris", true).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, MISSING_TOKEN_TITLE);
        assert_eq!(results[0].subtitle, plugin.description());
        assert_eq!(results[0].icon, theme::LIGHT_ICON);
        assert!(!results[0].actionable);
    }

    #[tokio::test]
    async fn settings_update_is_observed_by_the_next_query() {
        let plugin = plugin();

        assert_eq!(plugin.query("Paris", false).await.len(), 1);

        plugin.update_settings(Some("abc".into()), None);

        // Configured now: the immediate phase has nothing to show but no
        // longer reports a configuration error.
        assert!(plugin.query("Paris", false).await.is_empty());
    }

    #[test]
    fn theme_change_notification_swaps_the_icon() {
        let listeners = ThemeListeners::new();
        let plugin = plugin();
        plugin.init(&listeners, Theme::Dark);
        assert_eq!(plugin.current_icon(), theme::DARK_ICON);

        listeners.notify(Theme::HighContrastWhite);
        assert_eq!(plugin.current_icon(), theme::LIGHT_ICON);

        listeners.notify(Theme::Dark);
        assert_eq!(plugin.current_icon(), theme::DARK_ICON);
    }

    #[test]
    fn reload_rereads_the_current_theme() {
        let listeners = ThemeListeners::new();
        let plugin = plugin();
        plugin.init(&listeners, Theme::Dark);

        plugin.reload(Theme::Light);

        assert_eq!(plugin.current_icon(), theme::LIGHT_ICON);
    }

    #[test]
    fn dispose_unsubscribes_exactly_once() {
        let listeners = ThemeListeners::new();
        let plugin = plugin();
        plugin.init(&listeners, Theme::Dark);
        assert_eq!(listeners.len(), 1);

        plugin.dispose(&listeners);
        assert!(listeners.is_empty());

        // Second dispose is a no-op even if another plugin registered in
        // the meantime.
        let other = listeners.register(Box::new(|_| {}));
        plugin.dispose(&listeners);
        assert_eq!(listeners.len(), 1);
        listeners.unregister(other);
    }
}
