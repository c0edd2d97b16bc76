use crate::error::StoreError;
use crate::translation::{TranslationKey, TranslationRecord, TranslationStore, Upserted};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// In-process translation store with the same semantics as the PostgreSQL
/// one. Used by tests and for running the API without a database.
#[derive(Default)]
pub struct MemoryTranslationStore {
    rows: RwLock<HashMap<TranslationKey, TranslationRecord>>,
    next_id: AtomicI64,
}

impl MemoryTranslationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TranslationStore for MemoryTranslationStore {
    async fn find_field(
        &self,
        key: &TranslationKey,
    ) -> Result<Option<TranslationRecord>, StoreError> {
        Ok(self.rows.read().await.get(key).cloned())
    }

    async fn find_for_record(
        &self,
        record_type: &str,
        record_id: i64,
        language: Option<&str>,
    ) -> Result<Vec<TranslationRecord>, StoreError> {
        let rows = self.rows.read().await;
        let mut matching: Vec<TranslationRecord> = rows
            .values()
            .filter(|row| row.record_type == record_type && row.record_id == record_id)
            .filter(|row| language.map_or(true, |lang| row.language == lang))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            a.language
                .cmp(&b.language)
                .then_with(|| a.field_name.cmp(&b.field_name))
        });
        Ok(matching)
    }

    async fn upsert(&self, key: &TranslationKey, value: &str) -> Result<Upserted, StoreError> {
        let now = Utc::now();
        let mut rows = self.rows.write().await;

        let upserted = match rows.get_mut(key) {
            Some(existing) => {
                existing.value = value.to_string();
                existing.updated_at = now;
                Upserted {
                    record: existing.clone(),
                    inserted: false,
                }
            }
            None => {
                let record = TranslationRecord {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
                    record_type: key.record_type.clone(),
                    record_id: key.record_id,
                    field_name: key.field_name.clone(),
                    language: key.language.clone(),
                    value: value.to_string(),
                    created_at: now,
                    updated_at: now,
                };
                rows.insert(key.clone(), record.clone());
                Upserted {
                    record,
                    inserted: true,
                }
            }
        };

        Ok(upserted)
    }

    async fn delete_for_record(
        &self,
        record_type: &str,
        record_id: i64,
    ) -> Result<u64, StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|key, _| !(key.record_type == record_type && key.record_id == record_id));
        Ok((before - rows.len()) as u64)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.rows.read().await.len() as i64)
    }
}
