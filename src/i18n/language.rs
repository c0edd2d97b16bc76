//! Language type and request-language resolution.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// A validated, enabled content language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "fr", "en")
    code: &'static str,
}

impl Language {
    pub const FRENCH: Language = Language { code: "fr" };
    pub const ENGLISH: Language = Language { code: "en" };

    /// Strictly parse a language code.
    ///
    /// The code is matched case-insensitively after trimming. Unknown or
    /// disabled languages are rejected.
    pub fn from_code(code: &str) -> Result<Language> {
        let normalized = code.trim().to_ascii_lowercase();
        let registry = LanguageRegistry::get();

        match registry.get_by_code(&normalized) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Resolve a free-form language preference such as an `Accept-Language`
    /// header value.
    ///
    /// Takes the first comma-separated entry, drops quality (`;q=`) and
    /// region (`-US`) subtags, lowercases it and returns the matching
    /// supported language. Anything else resolves to the canonical language.
    pub fn resolve(preference: Option<&str>) -> Language {
        preference
            .and_then(primary_subtag)
            .and_then(|tag| Language::from_code(&tag).ok())
            .unwrap_or_else(Language::canonical)
    }

    /// The language records are authored in.
    pub fn canonical() -> Language {
        Language {
            code: LanguageRegistry::get().canonical().code,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full language configuration from the registry.
    pub fn config(&self) -> &'static LanguageConfig {
        let registry = LanguageRegistry::get();
        registry
            .get_by_code(self.code)
            .unwrap_or_else(|| registry.canonical())
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// `true` when no overlay is ever needed for this language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

/// First entry of a preference list, reduced to its primary subtag.
fn primary_subtag(preference: &str) -> Option<String> {
    let first = preference.split(',').next()?;
    let without_quality = first.split(';').next()?;
    let primary = without_quality.split('-').next()?.trim();

    if primary.is_empty() {
        return None;
    }

    Some(primary.to_ascii_lowercase())
}
