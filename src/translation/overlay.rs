//! Overlay Applier: patches default-language response objects with stored
//! translations.
//!
//! Fallback is per field. An attribute is replaced only when it is in the
//! allowlist, currently holds a non-empty value, and a translation exists for
//! it. Everything else keeps its default-language value.

use crate::error::StoreError;
use crate::i18n::Language;
use crate::translation::{is_translatable, OverlayMetrics, Translatable, TranslationService};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// What happened to one object.
#[derive(Debug)]
pub enum OverlayOutcome {
    /// Target language is the default one; the store was not consulted.
    DefaultLanguage,
    /// The object has no identifier; returned untouched.
    MissingId,
    /// Lookup succeeded; `fields` attributes were replaced (possibly zero).
    Applied { fields: usize },
    /// Lookup failed; returned untouched.
    LookupFailed(StoreError),
}

/// An object after overlay, together with how it was handled.
#[derive(Debug)]
pub struct Overlaid<T> {
    pub item: T,
    pub outcome: OverlayOutcome,
}

impl<T> Overlaid<T> {
    fn new(item: T, outcome: OverlayOutcome) -> Self {
        Self { item, outcome }
    }

    pub fn into_inner(self) -> T {
        self.item
    }
}

#[derive(Clone)]
pub struct OverlayApplier {
    translations: TranslationService,
    metrics: Arc<OverlayMetrics>,
}

impl OverlayApplier {
    pub fn new(translations: TranslationService) -> Self {
        Self {
            translations,
            metrics: Arc::new(OverlayMetrics::new()),
        }
    }

    pub fn metrics(&self) -> &OverlayMetrics {
        &self.metrics
    }

    /// Overlay a single object.
    ///
    /// Takes the object by value, so the caller's copy is the only one
    /// patched. Issues at most one bulk lookup.
    pub async fn overlay<T: Translatable>(
        &self,
        record_type: &str,
        mut item: T,
        language: Language,
    ) -> Overlaid<T> {
        if language.is_canonical() {
            return Overlaid::new(item, OverlayOutcome::DefaultLanguage);
        }

        let Some(record_id) = item.record_id() else {
            self.metrics.record_missing_id();
            return Overlaid::new(item, OverlayOutcome::MissingId);
        };

        self.metrics.record_lookup();
        let overlays = match self
            .translations
            .get_all_fields(record_type, record_id, language.code())
            .await
        {
            Ok(overlays) => overlays,
            Err(e) => {
                self.metrics.record_lookup_failure();
                return Overlaid::new(item, OverlayOutcome::LookupFailed(e));
            }
        };

        let (overlaid, fallback) = patch_fields(&mut item, &overlays);
        self.metrics.record_fields(overlaid, fallback);

        Overlaid::new(item, OverlayOutcome::Applied { fields: overlaid })
    }

    /// Overlay every object independently, preserving order.
    ///
    /// Lookups for different objects run concurrently; one object's failure
    /// never affects another.
    pub async fn overlay_each<T: Translatable>(
        &self,
        record_type: &str,
        items: Vec<T>,
        language: Language,
    ) -> Vec<Overlaid<T>> {
        if language.is_canonical() {
            return items
                .into_iter()
                .map(|item| Overlaid::new(item, OverlayOutcome::DefaultLanguage))
                .collect();
        }

        join_all(
            items
                .into_iter()
                .map(|item| self.overlay(record_type, item, language)),
        )
        .await
    }

    /// Overlay a list and return plain objects, logging the ones that could
    /// not be overlaid.
    pub async fn overlay_all<T: Translatable>(
        &self,
        record_type: &str,
        items: Vec<T>,
        language: Language,
    ) -> Vec<T> {
        self.overlay_each(record_type, items, language)
            .await
            .into_iter()
            .map(|overlaid| log_outcome(record_type, overlaid))
            .collect()
    }

    /// Overlay an optional object (e.g. a singleton section that may not
    /// exist yet).
    pub async fn overlay_optional<T: Translatable>(
        &self,
        record_type: &str,
        item: Option<T>,
        language: Language,
    ) -> Option<T> {
        match item {
            Some(item) => {
                let overlaid = self.overlay(record_type, item, language).await;
                Some(log_outcome(record_type, overlaid))
            }
            None => None,
        }
    }
}

/// Apply overlays to the allowlisted attributes of `item`.
/// Returns (attributes replaced, attributes kept as fallback).
fn patch_fields<T: Translatable>(item: &mut T, overlays: &HashMap<String, String>) -> (usize, usize) {
    let mut overlaid = 0;
    let mut fallback = 0;

    for accessor in T::fields() {
        if !is_translatable(accessor.name) {
            continue;
        }

        let has_value = (accessor.get)(item).is_some_and(|value| !value.is_empty());
        if !has_value {
            continue;
        }

        match overlays.get(accessor.name) {
            Some(translated) => {
                (accessor.set)(item, translated.clone());
                overlaid += 1;
            }
            None => fallback += 1,
        }
    }

    (overlaid, fallback)
}

fn log_outcome<T: Translatable>(record_type: &str, overlaid: Overlaid<T>) -> T {
    match &overlaid.outcome {
        OverlayOutcome::LookupFailed(e) => {
            warn!(
                "Serving {} #{:?} untranslated, overlay lookup failed: {}",
                record_type,
                overlaid.item.record_id(),
                e
            );
        }
        OverlayOutcome::MissingId => {
            debug!("Skipping overlay for {} without identifier", record_type);
        }
        OverlayOutcome::DefaultLanguage | OverlayOutcome::Applied { .. } => {}
    }
    overlaid.into_inner()
}
