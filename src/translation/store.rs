//! Translation Store: persisted overlay values keyed by
//! (record type, record id, field name, language).

use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Unique key of one translated attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    pub record_type: String,
    pub record_id: i64,
    pub field_name: String,
    pub language: String,
}

impl TranslationKey {
    pub fn new(record_type: &str, record_id: i64, field_name: &str, language: &str) -> Self {
        Self {
            record_type: record_type.to_string(),
            record_id,
            field_name: field_name.to_string(),
            language: language.to_string(),
        }
    }
}

/// One stored translation row.
///
/// `record_type`/`record_id` reference the owning record by value only; the
/// owning record lives in a separate store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    pub id: i64,
    #[sqlx(rename = "entity_type")]
    pub record_type: String,
    #[sqlx(rename = "entity_id")]
    pub record_id: i64,
    pub field_name: String,
    pub language: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row as returned by an upsert.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Upserted {
    #[sqlx(flatten)]
    pub record: TranslationRecord,
    /// `true` if the key did not exist before this write.
    pub inserted: bool,
}

/// Storage backend for translation rows.
///
/// Implementations own the rows exclusively. `upsert` must be atomic per key;
/// concurrent writes to the same key resolve last-writer-wins.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// Point lookup of a single key.
    async fn find_field(&self, key: &TranslationKey)
        -> Result<Option<TranslationRecord>, StoreError>;

    /// Every row of a record, optionally restricted to one language.
    async fn find_for_record(
        &self,
        record_type: &str,
        record_id: i64,
        language: Option<&str>,
    ) -> Result<Vec<TranslationRecord>, StoreError>;

    /// Insert the key, or overwrite `value` and `updated_at` if it exists.
    async fn upsert(&self, key: &TranslationKey, value: &str) -> Result<Upserted, StoreError>;

    /// Remove every row of a record across all fields and languages.
    /// Returns the number of rows removed.
    async fn delete_for_record(&self, record_type: &str, record_id: i64)
        -> Result<u64, StoreError>;

    /// Total number of stored rows.
    async fn count(&self) -> Result<i64, StoreError>;
}
