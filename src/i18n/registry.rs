//! Language registry: single source of truth for the content languages.
//!
//! Portfolio records are authored in the canonical language. Every other
//! enabled language is served through translation overlays.

use std::sync::OnceLock;

/// Configuration for a supported content language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "fr", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "French", "English")
    pub name: &'static str,

    /// Native name of the language (e.g., "Français", "English")
    pub native_name: &'static str,

    /// Whether records are authored in this language (exactly one is)
    pub is_canonical: bool,

    /// Whether this language may be requested by clients
    pub enabled: bool,
}

/// Language the owning records store their own fields in.
const CANONICAL: LanguageConfig = LanguageConfig {
    code: "fr",
    name: "French",
    native_name: "Français",
    is_canonical: true,
    enabled: true,
};

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its exact (lowercase) code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, canonical first.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the canonical language configuration.
    pub fn canonical(&self) -> &LanguageConfig {
        self.languages
            .iter()
            .find(|lang| lang.is_canonical)
            .unwrap_or(&CANONICAL)
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// French is canonical; English is the one overlay language.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        CANONICAL,
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: false,
            enabled: true,
        },
    ]
}
