use crate::error::StoreError;
use crate::translation::{TranslationKey, TranslationRecord, TranslationStore, Upserted};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

const COLUMNS: &str =
    "id, entity_type, entity_id, field_name, language, value, created_at, updated_at";

/// PostgreSQL-backed translation store over the `translations` table.
#[derive(Clone)]
pub struct PgTranslationStore {
    pool: PgPool,
}

impl PgTranslationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TranslationStore for PgTranslationStore {
    async fn find_field(
        &self,
        key: &TranslationKey,
    ) -> Result<Option<TranslationRecord>, StoreError> {
        let row = sqlx::query_as::<_, TranslationRecord>(&format!(
            "SELECT {COLUMNS} FROM translations
             WHERE entity_type = $1 AND entity_id = $2 AND field_name = $3 AND language = $4"
        ))
        .bind(&key.record_type)
        .bind(key.record_id)
        .bind(&key.field_name)
        .bind(&key.language)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_for_record(
        &self,
        record_type: &str,
        record_id: i64,
        language: Option<&str>,
    ) -> Result<Vec<TranslationRecord>, StoreError> {
        // A NULL language parameter matches every language
        let rows = sqlx::query_as::<_, TranslationRecord>(&format!(
            "SELECT {COLUMNS} FROM translations
             WHERE entity_type = $1 AND entity_id = $2
               AND ($3::TEXT IS NULL OR language = $3)
             ORDER BY language, field_name"
        ))
        .bind(record_type)
        .bind(record_id)
        .bind(language)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn upsert(&self, key: &TranslationKey, value: &str) -> Result<Upserted, StoreError> {
        let now = Utc::now();

        // xmax is zero only for a row this statement inserted
        let row = sqlx::query_as::<_, Upserted>(&format!(
            "INSERT INTO translations
                 (entity_type, entity_id, field_name, language, value, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             ON CONFLICT (entity_type, entity_id, field_name, language)
             DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        ))
        .bind(&key.record_type)
        .bind(key.record_id)
        .bind(&key.field_name)
        .bind(&key.language)
        .bind(value)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_for_record(
        &self,
        record_type: &str,
        record_id: i64,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM translations WHERE entity_type = $1 AND entity_id = $2")
            .bind(record_type)
            .bind(record_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM translations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
