use std::sync::RwLock;

/// The two user-supplied settings, always read and replaced as a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Settings {
    api_token: Option<String>,
    default_city: Option<String>,
}

/// In-memory settings shared between the host's settings-update path and
/// query handling.
///
/// Persistence is the host's responsibility; this store only guarantees
/// that readers never observe a half-updated token/city pair. Values are
/// opaque strings, stored unvalidated.
#[derive(Debug, Default)]
pub struct ConfigStore {
    settings: RwLock<Settings>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_token(&self) -> Option<String> {
        self.read().api_token
    }

    pub fn default_city(&self) -> Option<String> {
        self.read().default_city
    }

    /// Replace both settings at once. Subsequent reads observe either the
    /// old pair or the new pair, never a mix.
    pub fn update(&self, api_token: Option<String>, default_city: Option<String>) {
        let mut guard = self.settings.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Settings { api_token, default_city };
    }

    fn read(&self) -> Settings {
        self.settings.read().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}
