use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the resolved user through to handlers.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

/// Middleware gating protected routes on bearer-token resolution.
///
/// Header parsing, token validation, and subject lookup all live in the
/// domain gate; this layer only bridges the HTTP request to it and logs
/// the sub-reason when resolution fails.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let user = state.auth_service.resolve_bearer(header).await.map_err(|e| {
        tracing::warn!(reason = %e, "Request authorization rejected");
        ApiError::from(e).into_response()
    })?;

    req.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(req).await)
}
