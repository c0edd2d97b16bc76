use crate::error::StoreError;
use crate::translation::{TranslationKey, TranslationRecord, TranslationStore, Upserted};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Read/write operations over the translation store.
///
/// `language` is never validated here; callers resolve it first.
#[derive(Clone)]
pub struct TranslationService {
    store: Arc<dyn TranslationStore>,
}

impl TranslationService {
    pub fn new(store: Arc<dyn TranslationStore>) -> Self {
        Self { store }
    }

    /// Translated value of a single field, if one is stored.
    pub async fn get_field(
        &self,
        record_type: &str,
        record_id: i64,
        field_name: &str,
        language: &str,
    ) -> Result<Option<String>, StoreError> {
        let key = TranslationKey::new(record_type, record_id, field_name, language);
        Ok(self.store.find_field(&key).await?.map(|record| record.value))
    }

    /// All translated fields of a record in one language (`field -> value`).
    /// Empty when nothing is stored.
    pub async fn get_all_fields(
        &self,
        record_type: &str,
        record_id: i64,
        language: &str,
    ) -> Result<HashMap<String, String>, StoreError> {
        let rows = self
            .store
            .find_for_record(record_type, record_id, Some(language))
            .await?;

        Ok(rows
            .into_iter()
            .map(|record| (record.field_name, record.value))
            .collect())
    }

    /// Every row of a record across all languages.
    pub async fn get_record_translations(
        &self,
        record_type: &str,
        record_id: i64,
    ) -> Result<Vec<TranslationRecord>, StoreError> {
        self.store.find_for_record(record_type, record_id, None).await
    }

    /// Create or overwrite the translation of one field.
    pub async fn upsert(
        &self,
        record_type: &str,
        record_id: i64,
        field_name: &str,
        language: &str,
        value: &str,
    ) -> Result<TranslationRecord, StoreError> {
        let key = TranslationKey::new(record_type, record_id, field_name, language);
        let Upserted { record, inserted } = self.store.upsert(&key, value).await?;

        if inserted {
            debug!(
                "Created translation: {} #{} - {} [{}]",
                record_type, record_id, field_name, language
            );
        } else {
            debug!(
                "Updated translation: {} #{} - {} [{}]",
                record_type, record_id, field_name, language
            );
        }

        Ok(record)
    }

    /// Upsert each entry in turn.
    ///
    /// Not atomic across entries: on failure the entries already written stay
    /// written and the error is returned.
    pub async fn upsert_many<I>(
        &self,
        record_type: &str,
        record_id: i64,
        language: &str,
        fields: I,
    ) -> Result<Vec<TranslationRecord>, StoreError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut written = Vec::new();
        for (field_name, value) in fields {
            let record = self
                .upsert(record_type, record_id, &field_name, language, &value)
                .await?;
            written.push(record);
        }
        Ok(written)
    }

    /// Remove every translation of a record. Idempotent.
    pub async fn delete_all_for_record(
        &self,
        record_type: &str,
        record_id: i64,
    ) -> Result<u64, StoreError> {
        let removed = self.store.delete_for_record(record_type, record_id).await?;
        info!(
            "Deleted {} translations for {} #{}",
            removed, record_type, record_id
        );
        Ok(removed)
    }

    /// Total number of stored translation rows.
    pub async fn count(&self) -> Result<i64, StoreError> {
        self.store.count().await
    }
}
