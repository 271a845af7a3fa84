use url::Url;

use crate::i18n::{Language, Translator};

/// Boundary configuration handed to the core. Nothing in here is interpreted
/// beyond building requests and picking message tables.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: Url,
    /// Map-provider key, passed through to the map widget untouched.
    pub maps_api_key: Option<String>,
    pub language: Language,
}

impl Config {
    pub fn new(backend_url: Url) -> Self {
        Self {
            backend_url,
            maps_api_key: None,
            language: Language::default(),
        }
    }

    pub fn with_maps_api_key(mut self, key: Option<String>) -> Self {
        self.maps_api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.language)
    }
}

/// Language from an explicit choice, else from the process locale
/// (`LC_ALL`, `LC_MESSAGES`, `LANG`), else Portuguese.
pub fn resolve_language(explicit: Option<Language>) -> Language {
    if let Some(language) = explicit {
        return language;
    }
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .map(|locale| Language::detect(&locale))
        .unwrap_or_default()
}
