//! services/api/src/web/dashboard.rs
//!
//! Contains the Axum handlers for the resume dashboard endpoints and the
//! master definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

use resumelens_core::domain::{ResumeRecord, ResumeUpload};
use resumelens_core::workflow::AnalysisError;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::login_handler,
        crate::web::auth::signup_handler,
        crate::web::auth::social_login_handler,
        crate::web::auth::logout_handler,
        crate::web::auth::session_handler,
        list_resumes_handler,
        analyze_resume_handler,
        select_resume_handler,
    ),
    components(
        schemas(
            crate::web::auth::LoginRequest,
            crate::web::auth::SignupRequest,
            crate::web::auth::SocialLoginRequest,
            crate::web::auth::UserResponse,
            crate::web::auth::SessionResponse,
            ResumeResponse,
            DashboardResponse,
            SelectRequest,
        )
    ),
    tags(
        (name = "ResumeLens API", description = "API endpoints for the resume scoring dashboard.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// One analyzed resume as shown on the dashboard.
#[derive(Serialize, ToSchema)]
pub struct ResumeResponse {
    pub id: i64,
    pub name: String,
    pub score: u8,
    pub keywords_found: Vec<String>,
    pub improvement_tips: String,
    pub last_updated: String,
}

impl ResumeResponse {
    fn from_domain(record: ResumeRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            score: record.score,
            keywords_found: record.keywords_found,
            improvement_tips: record.improvement_tips,
            last_updated: record.last_updated,
        }
    }
}

/// The full dashboard state: every analyzed resume (newest first), the one
/// currently selected for display, and whether an analysis is running.
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub analyzing: bool,
    pub resumes: Vec<ResumeResponse>,
    pub selected: Option<ResumeResponse>,
}

#[derive(Deserialize, ToSchema)]
pub struct SelectRequest {
    pub id: i64,
}

//=========================================================================================
// Dashboard Handlers
//=========================================================================================

/// GET /resumes - List analyzed resumes and the current selection
#[utoipa::path(
    get,
    path = "/resumes",
    responses(
        (status = 200, description = "Dashboard state", body = DashboardResponse),
        (status = 401, description = "Not signed in"),
        (status = 503, description = "Session restore in progress")
    )
)]
pub async fn list_resumes_handler(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let snapshot = state.workflow.snapshot();

    let selected = snapshot
        .selected_id
        .and_then(|id| snapshot.records.iter().find(|r| r.id == id).cloned())
        .map(ResumeResponse::from_domain);

    Json(DashboardResponse {
        analyzing: snapshot.analyzing,
        resumes: snapshot
            .records
            .into_iter()
            .map(ResumeResponse::from_domain)
            .collect(),
        selected,
    })
}

/// Upload a resume for analysis.
///
/// Accepts a multipart/form-data request whose first file part names the
/// resume. Only the file name matters; the contents are never read. The
/// response arrives once the simulated analysis completes.
#[utoipa::path(
    post,
    path = "/resumes",
    request_body(content_type = "multipart/form-data", description = "The resume file to analyze."),
    responses(
        (status = 201, description = "Analysis complete", body = ResumeResponse),
        (status = 400, description = "No file was provided"),
        (status = 401, description = "Not signed in"),
        (status = 409, description = "An analysis is already in progress"),
        (status = 415, description = "Unsupported or missing file extension"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn analyze_resume_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let field = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart data: {}", e),
        )
    })?;

    // A part without a filename is not an upload; the workflow reports it
    // as a missing file.
    let upload = field.and_then(|f| f.file_name().map(ResumeUpload::new));

    match state.workflow.request_analysis(upload).await {
        Ok(record) => Ok((StatusCode::CREATED, Json(ResumeResponse::from_domain(record)))),
        Err(e) => {
            let status = match &e {
                AnalysisError::MissingFile => StatusCode::BAD_REQUEST,
                AnalysisError::MissingExtension | AnalysisError::UnsupportedFormat(_) => {
                    StatusCode::UNSUPPORTED_MEDIA_TYPE
                }
                AnalysisError::AlreadyRunning => StatusCode::CONFLICT,
                AnalysisError::Unexpected(_) => {
                    error!("Analysis failed: {:?}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            Err((status, e.to_string()))
        }
    }
}

/// PUT /resumes/selected - Choose which resume the dashboard displays
#[utoipa::path(
    put,
    path = "/resumes/selected",
    request_body = SelectRequest,
    responses(
        (status = 204, description = "Selection updated; unknown ids are ignored"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn select_resume_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectRequest>,
) -> StatusCode {
    state.workflow.select_record(req.id);
    StatusCode::NO_CONTENT
}
