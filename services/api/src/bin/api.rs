//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{SeededRandom, SessionFileStore, StdRandom, TokioClock},
    config::Config,
    error::ApiError,
    seed,
    web::{dashboard::ApiDoc, router, state::AppState},
};
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::Router;
use resumelens_core::ports::RandomSource;
use resumelens_core::{AnalysisWorkflow, SessionStore};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Port Adapters ---
    let repo = Arc::new(SessionFileStore::new(config.session_store_path.clone()));
    let clock = Arc::new(TokioClock);
    let random: Arc<dyn RandomSource> = match config.rng_seed {
        Some(seed) => {
            info!("Using seeded randomness (RNG_SEED={})", seed);
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(StdRandom),
    };

    // --- 3. Restore the Persisted Session ---
    let sessions = SessionStore::new(repo, clock.clone());
    info!("Restoring persisted session state...");
    sessions.restore().await;

    // --- 4. Build the Analysis Workflow ---
    let records = if config.seed_demo_resumes {
        seed::demo_resumes()
    } else {
        Vec::new()
    };
    let workflow = AnalysisWorkflow::with_records(clock, random, records);

    // --- 5. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        sessions,
        workflow,
        config: config.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:5173".parse::<HeaderValue>().unwrap())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 6. Create the Web Router ---
    let api_router = router(app_state).layer(cors);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 7. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
