//! services/api/src/web/middleware.rs
//!
//! Session middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::web::state::AppState;

/// Middleware that admits only requests with an established session.
///
/// While session restoration is still pending it returns 503 so clients can
/// retry instead of bouncing to a login flow; once restoration has finished,
/// anonymous requests get 401.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let session = state.sessions.snapshot();

    if session.restoring {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    if session.user.is_none() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(req).await)
}
