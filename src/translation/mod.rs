//! Multilingual attribute overlays.
//!
//! Translated values for arbitrary record fields live in one shared table,
//! keyed by (record type, record id, field name, language). At read time the
//! [`OverlayApplier`] patches default-language response objects with them.
//!
//! - `store`: row type and the [`TranslationStore`] backend trait
//! - `postgres` / `memory`: store implementations
//! - `service`: [`TranslationService`], the read/write operations
//! - `fields`: attribute allowlist and per-type accessor tables
//! - `overlay`: the [`OverlayApplier`]
//! - `metrics`: overlay counters

mod fields;
mod memory;
mod metrics;
mod overlay;
mod postgres;
mod service;
mod store;

pub use fields::{
    is_translatable, FieldAccessor, TextAttribute, Translatable, TRANSLATABLE_FIELDS,
};
pub use memory::MemoryTranslationStore;
pub use metrics::{MetricsReport, OverlayMetrics};
pub use overlay::{Overlaid, OverlayApplier, OverlayOutcome};
pub use postgres::PgTranslationStore;
pub use service::TranslationService;
pub use store::{TranslationKey, TranslationRecord, TranslationStore, Upserted};
