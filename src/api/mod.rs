//! HTTP surface: public read endpoints and the admin API.

mod admin;
mod auth;
mod extract;
mod public;

use crate::content::ContentStore;
use crate::translation::{OverlayApplier, TranslationService, TranslationStore};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared handles for every request handler.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentStore>,
    pub translations: TranslationService,
    pub overlay: OverlayApplier,
    pub admin_api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        content: Arc<dyn ContentStore>,
        translation_store: Arc<dyn TranslationStore>,
        admin_api_key: Option<String>,
    ) -> Self {
        let translations = TranslationService::new(translation_store);
        Self {
            content,
            overlay: OverlayApplier::new(translations.clone()),
            translations,
            admin_api_key: admin_api_key.map(Arc::from),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let admin = admin::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_admin,
    ));

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", public::routes())
        .nest("/api/v1/admin", admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Response {
    match state.translations.count().await {
        Ok(_) => Json(json!({ "status": "UP" })).into_response(),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "DOWN" })),
            )
                .into_response()
        }
    }
}
