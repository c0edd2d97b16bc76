use crate::api::extract::ApiJson;
use crate::api::AppState;
use crate::content::{validate_contact_message, ContactMessage, NewContactMessage, RecordKind};
use crate::error::{ApiError, ApiResult};
use crate::i18n::Language;
use crate::translation::Translatable;
use axum::extract::State;
use axum::http::header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::{debug, info};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/about", get(about))
        .route("/projects", get(projects))
        .route("/skills", get(skills))
        .route("/experiences", get(experiences))
        .route("/education", get(education))
        .route("/languages", get(languages))
        .route("/interests", get(interests))
        .route("/contact", post(contact))
}

/// Target language of a request, from its `Accept-Language` header.
fn request_language(headers: &HeaderMap) -> Language {
    Language::resolve(
        headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok()),
    )
}

fn localized<T: Serialize>(language: Language, body: T) -> Response {
    ([(CONTENT_LANGUAGE, language.code())], Json(body)).into_response()
}

async fn overlaid_list<T>(
    state: &AppState,
    kind: RecordKind,
    headers: &HeaderMap,
    items: Vec<T>,
) -> Response
where
    T: Translatable + Serialize,
{
    let language = request_language(headers);
    debug!("GET {} list [{}] ({} records)", kind, language, items.len());
    let items = state.overlay.overlay_all(kind.tag(), items, language).await;
    localized(language, items)
}

async fn about(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let language = request_language(&headers);
    let about = state.content.about().await?;

    match state
        .overlay
        .overlay_optional(RecordKind::About.tag(), about, language)
        .await
    {
        Some(about) => Ok(localized(language, about)),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

async fn projects(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let items = state.content.projects().await?;
    Ok(overlaid_list(&state, RecordKind::Project, &headers, items).await)
}

async fn skills(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let items = state.content.skills().await?;
    Ok(overlaid_list(&state, RecordKind::Skill, &headers, items).await)
}

async fn experiences(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let items = state.content.experiences().await?;
    Ok(overlaid_list(&state, RecordKind::Experience, &headers, items).await)
}

async fn education(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let items = state.content.education().await?;
    Ok(overlaid_list(&state, RecordKind::Education, &headers, items).await)
}

async fn languages(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let items = state.content.languages().await?;
    Ok(overlaid_list(&state, RecordKind::Language, &headers, items).await)
}

async fn interests(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let items = state.content.interests().await?;
    Ok(overlaid_list(&state, RecordKind::Interest, &headers, items).await)
}

async fn contact(
    State(state): State<AppState>,
    ApiJson(message): ApiJson<NewContactMessage>,
) -> ApiResult<(StatusCode, Json<ContactMessage>)> {
    validate_contact_message(&message).map_err(ApiError::Validation)?;

    let saved = state.content.save_message(message).await?;
    info!("Contact message #{} received from {}", saved.id, saved.email);

    Ok((StatusCode::CREATED, Json(saved)))
}
