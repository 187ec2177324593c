pub mod auth;
pub mod dashboard;
pub mod middleware;
pub mod state;

// Re-export the guard so the binary can reference it without the full path.
pub use middleware::require_session;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use state::AppState;
use std::sync::Arc;

/// Builds the complete API router. Kept separate from the binary so the
/// integration tests drive the exact same route table.
pub fn router(app_state: Arc<AppState>) -> Router {
    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/social", post(auth::social_login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/auth/session", get(auth::session_handler));

    // Protected routes (session required)
    let protected_routes = Router::new()
        .route(
            "/resumes",
            get(dashboard::list_resumes_handler).post(dashboard::analyze_resume_handler),
        )
        .route("/resumes/selected", put(dashboard::select_resume_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(app_state)
}
