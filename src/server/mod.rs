//! HTTP surface
//!
//! Thin axum layer over the engine and store. Handlers never hold scoring
//! logic; they parse the request, call into the library, and map errors to
//! status codes through the shared error type.

pub mod handlers;

use crate::config::Config;
use crate::scoring::engine::ScoringEngine;
use crate::store::AnalysisStore;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<ScoringEngine>,
    pub store: Arc<AnalysisStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(AnalysisStore::new(&config.store));
        let engine = Arc::new(ScoringEngine::new(config.clone()));
        Self {
            config: Arc::new(config),
            engine,
            store,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/report/:id/json", get(handlers::report_json))
        .route("/api/report/:id/markdown", get(handlers::report_markdown))
        .route("/api/report/:id/pdf", get(handlers::report_pdf))
        .route("/api/admin/weights", get(handlers::default_weights))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
