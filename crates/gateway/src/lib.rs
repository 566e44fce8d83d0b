//! HTTP gateway for trampcoach.
//!
//! Exposes the chat endpoint as a chunked plain-text relay, a health
//! check, and the embedded browser frontend.
//!
//! Built on Axum for high performance async HTTP.

pub mod api;
pub mod frontend;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{routing::get, routing::post, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use trampcoach_core::Provider;
use trampcoach_providers::GeminiProvider;
use trampcoach_skills::SkillStore;

/// Shared application state for the gateway.
///
/// Everything here is immutable after startup; concurrent requests share
/// it through the outer `Arc` without locking.
pub struct GatewayState {
    pub provider: Arc<dyn Provider>,
    pub store: Arc<SkillStore>,
    pub model: String,
    pub temperature: f32,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - CORS (permissive; the same binary serves the frontend, so cross-origin
///   traffic only occurs in local development setups)
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(api::chat_handler))
        .with_state(state)
        .merge(frontend::frontend_router())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// Loads the skill dataset once, builds the provider once, and shares both
/// across all requests. Missing credentials or an unreadable dataset are
/// fatal here, before the listener binds.
pub async fn start(
    config: trampcoach_config::AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = config.require_api_key()?;
    let provider: Arc<dyn Provider> = Arc::new(GeminiProvider::new(api_key));

    let store = Arc::new(SkillStore::load(&config.dataset.path)?);
    info!(
        skills = store.len(),
        path = %config.dataset.path,
        "Skill dataset loaded"
    );

    let state = Arc::new(GatewayState {
        provider,
        store,
        model: config.model.clone(),
        temperature: config.temperature,
        start_time: chrono::Utc::now(),
    });

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: i64,
}

async fn health_handler(
    axum::extract::State(state): axum::extract::State<SharedState>,
) -> Json<HealthResponse> {
    let uptime = chrono::Utc::now() - state.start_time;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: uptime.num_seconds(),
    })
}
