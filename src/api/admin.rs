use crate::api::extract::{ApiJson, ApiPath};
use crate::api::AppState;
use crate::content::{
    validate_record, ContactMessage, DashboardStats, MessageStatus, PortfolioRecord, RecordKind,
};
use crate::error::{ApiError, ApiResult};
use crate::i18n::Language;
use crate::translation::{MetricsReport, TranslationRecord};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// Number of messages shown on the dashboard.
const RECENT_MESSAGES: usize = 5;

pub fn routes() -> Router<AppState> {
    let mut router = Router::new()
        .route("/dashboard/stats", get(dashboard_stats))
        .route("/about", get(get_about).put(put_about))
        .route(
            "/about/:id",
            delete(|state: State<AppState>, path: ApiPath<i64>| {
                delete_record(state, RecordKind::About, path)
            }),
        )
        .route("/messages", get(list_messages))
        .route("/messages/:id", delete(delete_message))
        .route("/messages/:id/read", put(mark_message_read))
        .route("/translations/metrics", get(translation_metrics))
        .route(
            "/translations/:record_type/:record_id",
            get(record_translations).delete(delete_record_translations),
        )
        .route(
            "/translations/:record_type/:record_id/:language",
            get(translated_fields).put(upsert_translations),
        )
        .route(
            "/translations/:record_type/:record_id/:language/:field",
            put(upsert_translation),
        );

    for kind in RecordKind::COLLECTIONS {
        router = router
            .route(
                &format!("/{}", kind.table()),
                get(move |state: State<AppState>| list_records(state, kind)).post(
                    move |state: State<AppState>, body: ApiJson<Value>| {
                        create_record(state, kind, body)
                    },
                ),
            )
            .route(
                &format!("/{}/:id", kind.table()),
                put(
                    move |state: State<AppState>, path: ApiPath<i64>, body: ApiJson<Value>| {
                        update_record(state, kind, path, body)
                    },
                )
                .delete(move |state: State<AppState>, path: ApiPath<i64>| {
                    delete_record(state, kind, path)
                }),
            );
    }

    router
}

// ==================== Path validation ====================

fn record_kind_from_tag(tag: &str) -> ApiResult<RecordKind> {
    RecordKind::from_tag(tag)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown record type: '{}'", tag)))
}

fn lookup_language(code: &str) -> ApiResult<Language> {
    Language::from_code(code).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Languages that may carry stored translations.
fn writable_language(code: &str) -> ApiResult<Language> {
    let language = lookup_language(code)?;
    if language.is_canonical() {
        return Err(ApiError::BadRequest(format!(
            "Translations cannot be written for the default language '{}'",
            language
        )));
    }
    Ok(language)
}

/// Decode and validate a record body.
fn record_from_body(kind: RecordKind, body: Value) -> ApiResult<PortfolioRecord> {
    let record = PortfolioRecord::from_json(kind, body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid {} body: {}", kind, e)))?;
    validate_record(&record).map_err(ApiError::Validation)?;
    Ok(record)
}

fn check_field_name(field: &str) -> ApiResult<()> {
    if field.trim().is_empty() {
        return Err(ApiError::BadRequest("Field name must not be empty".into()));
    }
    Ok(())
}

// ==================== Dashboard ====================

async fn dashboard_stats(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    debug!("GET /api/v1/admin/dashboard/stats");

    let messages = state.content.messages(None).await?;
    let unread = messages
        .iter()
        .filter(|m| m.status == MessageStatus::Unread)
        .count() as i64;
    let total_messages = messages.len() as i64;

    Ok(Json(DashboardStats {
        total_projects: state.content.count(RecordKind::Project).await?,
        total_skills: state.content.count(RecordKind::Skill).await?,
        total_experiences: state.content.count(RecordKind::Experience).await?,
        total_education: state.content.count(RecordKind::Education).await?,
        total_languages: state.content.count(RecordKind::Language).await?,
        total_interests: state.content.count(RecordKind::Interest).await?,
        total_messages,
        unread_messages: unread,
        read_messages: total_messages - unread,
        total_translations: state.translations.count().await?,
        recent_messages: messages.into_iter().take(RECENT_MESSAGES).collect(),
    }))
}

// ==================== Records ====================

/// Records of one kind in list order, without translations applied.
async fn list_records(
    State(state): State<AppState>,
    kind: RecordKind,
) -> ApiResult<Json<Vec<PortfolioRecord>>> {
    debug!("GET /api/v1/admin/{}", kind.table());

    let content = &state.content;
    let records: Vec<PortfolioRecord> = match kind {
        RecordKind::About => content
            .about()
            .await?
            .map(PortfolioRecord::About)
            .into_iter()
            .collect(),
        RecordKind::Project => wrap(content.projects().await?, PortfolioRecord::Project),
        RecordKind::Skill => wrap(content.skills().await?, PortfolioRecord::Skill),
        RecordKind::Experience => wrap(content.experiences().await?, PortfolioRecord::Experience),
        RecordKind::Education => wrap(content.education().await?, PortfolioRecord::Education),
        RecordKind::Language => wrap(content.languages().await?, PortfolioRecord::Language),
        RecordKind::Interest => wrap(content.interests().await?, PortfolioRecord::Interest),
    };
    Ok(Json(records))
}

fn wrap<T>(items: Vec<T>, variant: fn(T) -> PortfolioRecord) -> Vec<PortfolioRecord> {
    items.into_iter().map(variant).collect()
}

async fn create_record(
    State(state): State<AppState>,
    kind: RecordKind,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<(StatusCode, Json<PortfolioRecord>)> {
    info!("POST /api/v1/admin/{}", kind.table());

    let record = record_from_body(kind, body)?;
    let created = state.content.create(record).await?;
    info!("Created {} #{}", kind, created.id().unwrap_or_default());

    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_record(
    State(state): State<AppState>,
    kind: RecordKind,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<PortfolioRecord>> {
    info!("PUT /api/v1/admin/{}/{}", kind.table(), id);

    let record = record_from_body(kind, body)?;
    state
        .content
        .update(id, record)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", kind, id)))
}

/// Delete a record and every translation attached to it.
async fn delete_record(
    State(state): State<AppState>,
    kind: RecordKind,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    info!("DELETE /api/v1/admin/{}/{}", kind.table(), id);

    if !state.content.delete(kind, id).await? {
        return Err(ApiError::NotFound(format!("{} {} not found", kind, id)));
    }
    state
        .translations
        .delete_all_for_record(kind.tag(), id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn get_about(State(state): State<AppState>) -> ApiResult<Json<PortfolioRecord>> {
    debug!("GET /api/v1/admin/about");

    state
        .content
        .about()
        .await?
        .map(|about| Json(PortfolioRecord::About(about)))
        .ok_or_else(|| ApiError::NotFound("About section not found".into()))
}

/// Replace the About section, creating it if none exists yet.
async fn put_about(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Json<PortfolioRecord>> {
    info!("PUT /api/v1/admin/about");

    let record = record_from_body(RecordKind::About, body)?;
    let saved = match state.content.about().await?.and_then(|about| about.id) {
        Some(id) => state
            .content
            .update(id, record)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("About {} not found", id)))?,
        None => state.content.create(record).await?,
    };

    Ok(Json(saved))
}

// ==================== Messages ====================

#[derive(Debug, Deserialize)]
struct MessageFilter {
    status: Option<String>,
}

async fn list_messages(
    State(state): State<AppState>,
    Query(filter): Query<MessageFilter>,
) -> ApiResult<Json<Vec<ContactMessage>>> {
    debug!("GET /api/v1/admin/messages - Status filter: {:?}", filter.status);

    let status = filter
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<MessageStatus>)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    Ok(Json(state.content.messages(status).await?))
}

async fn mark_message_read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ContactMessage>> {
    info!("PUT /api/v1/admin/messages/{}/read", id);

    state
        .content
        .mark_message_read(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Message {} not found", id)))
}

async fn delete_message(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    info!("DELETE /api/v1/admin/messages/{}", id);

    if !state.content.delete_message(id).await? {
        return Err(ApiError::NotFound(format!("Message {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Translations ====================

async fn translation_metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(state.overlay.metrics().report())
}

async fn record_translations(
    State(state): State<AppState>,
    ApiPath((record_type, record_id)): ApiPath<(String, i64)>,
) -> ApiResult<Json<Vec<TranslationRecord>>> {
    let kind = record_kind_from_tag(&record_type)?;
    let records = state
        .translations
        .get_record_translations(kind.tag(), record_id)
        .await?;
    Ok(Json(records))
}

/// Field map of one record in one language, ordered by field name.
async fn translated_fields(
    State(state): State<AppState>,
    ApiPath((record_type, record_id, language)): ApiPath<(String, i64, String)>,
) -> ApiResult<Json<BTreeMap<String, String>>> {
    let kind = record_kind_from_tag(&record_type)?;
    let language = lookup_language(&language)?;
    let fields = state
        .translations
        .get_all_fields(kind.tag(), record_id, language.code())
        .await?;
    Ok(Json(fields.into_iter().collect()))
}

/// Batch upsert. Not atomic: a store failure leaves earlier entries written.
async fn upsert_translations(
    State(state): State<AppState>,
    ApiPath((record_type, record_id, language)): ApiPath<(String, i64, String)>,
    ApiJson(fields): ApiJson<HashMap<String, String>>,
) -> ApiResult<Json<Vec<TranslationRecord>>> {
    let kind = record_kind_from_tag(&record_type)?;
    let language = writable_language(&language)?;
    for field in fields.keys() {
        check_field_name(field)?;
    }

    info!(
        "PUT translations for {} #{} [{}] ({} fields)",
        kind,
        record_id,
        language,
        fields.len()
    );

    let mut fields: Vec<(String, String)> = fields.into_iter().collect();
    fields.sort();

    let records = state
        .translations
        .upsert_many(kind.tag(), record_id, language.code(), fields)
        .await?;
    Ok(Json(records))
}

#[derive(Debug, Deserialize)]
struct TranslationValue {
    value: String,
}

async fn upsert_translation(
    State(state): State<AppState>,
    ApiPath((record_type, record_id, language, field)): ApiPath<(String, i64, String, String)>,
    ApiJson(body): ApiJson<TranslationValue>,
) -> ApiResult<Json<TranslationRecord>> {
    let kind = record_kind_from_tag(&record_type)?;
    let language = writable_language(&language)?;
    check_field_name(&field)?;

    info!(
        "PUT translation {} #{} - {} [{}]",
        kind, record_id, field, language
    );

    let record = state
        .translations
        .upsert(kind.tag(), record_id, &field, language.code(), &body.value)
        .await?;
    Ok(Json(record))
}

async fn delete_record_translations(
    State(state): State<AppState>,
    ApiPath((record_type, record_id)): ApiPath<(String, i64)>,
) -> ApiResult<StatusCode> {
    let kind = record_kind_from_tag(&record_type)?;
    state
        .translations
        .delete_all_for_record(kind.tag(), record_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writable_language_rejects_default() {
        let err = writable_language("fr").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("default language"));
    }

    #[test]
    fn test_writable_language_accepts_alternate() {
        assert_eq!(writable_language(" EN ").expect("en"), Language::ENGLISH);
    }

    #[test]
    fn test_unknown_language_is_bad_request() {
        let err = lookup_language("xx").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_record_kind_from_tag_rejects_unknown() {
        assert_eq!(record_kind_from_tag("Project").expect("kind"), RecordKind::Project);
        assert!(record_kind_from_tag("projects").is_err());
    }

    #[test]
    fn test_record_from_body_validates() {
        let record = record_from_body(
            RecordKind::Interest,
            serde_json::json!({ "name": "Photographie", "icon": "camera" }),
        )
        .expect("valid");
        assert_eq!(record.kind(), RecordKind::Interest);

        let err = record_from_body(RecordKind::Interest, serde_json::json!({ "icon": "camera" }))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref errors) if errors[0].field == "name"));

        let err = record_from_body(RecordKind::Interest, serde_json::json!([1, 2])).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_check_field_name() {
        assert!(check_field_name("title").is_ok());
        assert!(check_field_name("  ").is_err());
    }
}
