use crate::api::AppState;
use crate::error::ApiError;
use crate::security::is_authorized;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

/// Reject admin requests that do not carry the configured API key.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if !is_authorized(state.admin_api_key.as_deref(), header) {
        warn!(
            "Rejected unauthorized admin request: {} {}",
            request.method(),
            request.uri().path()
        );
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
