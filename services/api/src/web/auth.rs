//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for login, signup, social login, logout, and
//! the session probe used by route-guarding frontends. Authentication here
//! is simulated: any credentials are accepted after a fixed delay.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::state::AppState;
use resumelens_core::domain::{Provider, UserIdentity};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SocialLoginRequest {
    /// Provider name, matched case-insensitively ("google" or "linkedin").
    pub provider: String,
}

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub name: String,
    pub email: String,
}

impl UserResponse {
    fn from_domain(identity: UserIdentity) -> Self {
        Self {
            name: identity.name,
            email: identity.email,
        }
    }
}

/// The current session state as seen by a client on page load.
#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub restoring: bool,
    pub user: Option<UserResponse>,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/login - Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let identity = state
        .sessions
        .login(&req.email, &req.password)
        .await
        .map_err(|e| {
            error!("Login failed: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Login failed".to_string())
        })?;

    Ok(Json(UserResponse::from_domain(identity)))
}

/// POST /auth/signup - Create an account and sign in
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let identity = state
        .sessions
        .signup(&req.name, &req.email, &req.password)
        .await
        .map_err(|e| {
            error!("Signup failed: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Signup failed".to_string())
        })?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_domain(identity))))
}

/// POST /auth/social - Sign in through a social provider
#[utoipa::path(
    post,
    path = "/auth/social",
    request_body = SocialLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserResponse),
        (status = 400, description = "Unknown provider"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn social_login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SocialLoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Resolve the provider; unknown names are the caller's mistake.
    let provider = req
        .provider
        .parse::<Provider>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    // 2. Run the simulated provider handshake.
    let identity = state.sessions.social_login(provider).await.map_err(|e| {
        error!("Social login failed: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Login failed".to_string())
    })?;

    Ok(Json(UserResponse::from_domain(identity)))
}

/// POST /auth/logout - Sign out
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.sessions.logout().await;
    Ok(StatusCode::OK)
}

/// GET /auth/session - Report the restore flag and current user
#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Current session state", body = SessionResponse)
    )
)]
pub async fn session_handler(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let snapshot = state.sessions.snapshot();
    Json(SessionResponse {
        restoring: snapshot.restoring,
        user: snapshot.user.map(UserResponse::from_domain),
    })
}
