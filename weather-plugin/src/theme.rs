use std::collections::HashMap;
use std::sync::Mutex;

/// Host launcher themes that affect icon selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    HighContrastWhite,
    HighContrastBlack,
}

pub const LIGHT_ICON: &str = "images/weather.light.png";
pub const DARK_ICON: &str = "images/weather.dark.png";

/// Light and high-contrast-white backgrounds get the light icon asset,
/// everything else the dark one.
pub fn icon_for_theme(theme: Theme) -> &'static str {
    match theme {
        Theme::Light | Theme::HighContrastWhite => LIGHT_ICON,
        Theme::Dark | Theme::HighContrastBlack => DARK_ICON,
    }
}

/// Handle returned by [`ThemeListeners::register`]; needed to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

pub type ThemeCallback = Box<dyn Fn(Theme) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<u64, ThemeCallback>,
}

/// Explicit theme-changed subscription registry.
///
/// The host notifies it when the user switches themes; plugins register a
/// callback at init and unregister at teardown. Unregistration is
/// idempotent: removing an already-removed listener is a no-op.
#[derive(Default)]
pub struct ThemeListeners {
    inner: Mutex<Registry>,
}

impl ThemeListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, callback: ThemeCallback) -> ListenerId {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, callback);
        ListenerId(id)
    }

    /// Returns whether the listener was still registered.
    pub fn unregister(&self, id: ListenerId) -> bool {
        self.lock().listeners.remove(&id.0).is_some()
    }

    pub fn notify(&self, theme: Theme) {
        let registry = self.lock();
        for callback in registry.listeners.values() {
            callback(theme);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn light_and_high_contrast_white_share_the_light_icon() {
        assert_eq!(icon_for_theme(Theme::Light), LIGHT_ICON);
        assert_eq!(icon_for_theme(Theme::HighContrastWhite), LIGHT_ICON);
        assert_eq!(icon_for_theme(Theme::Dark), DARK_ICON);
        assert_eq!(icon_for_theme(Theme::HighContrastBlack), DARK_ICON);
    }

    #[test]
    fn listeners_receive_notifications_until_unregistered() {
        let listeners = ThemeListeners::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let id = listeners.register(Box::new(move |theme| {
            sink.lock().expect("test lock").push(theme);
        }));
        assert_eq!(listeners.len(), 1);

        listeners.notify(Theme::Dark);
        listeners.notify(Theme::Light);

        assert!(listeners.unregister(id));
        listeners.notify(Theme::HighContrastBlack);

        assert_eq!(*seen.lock().expect("test lock"), vec![Theme::Dark, Theme::Light]);
        assert!(listeners.is_empty());
    }

    #[test]
    fn unregistering_twice_is_a_noop() {
        let listeners = ThemeListeners::new();
        let id = listeners.register(Box::new(|_| {}));

        assert!(listeners.unregister(id));
        assert!(!listeners.unregister(id));
    }

    #[test]
    fn ids_are_not_reused_across_registrations() {
        let listeners = ThemeListeners::new();

        let first = listeners.register(Box::new(|_| {}));
        listeners.unregister(first);
        let second = listeners.register(Box::new(|_| {}));

        assert_ne!(first, second);
    }
}
