use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use configs::ColumnPolicy;
use service::records::{repository::RecordRepository, RecordService};

pub mod records;

/// Per-process state handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    pub records: Arc<RecordService<dyn RecordRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn RecordRepository>, policy: ColumnPolicy) -> Self {
        Self { records: Arc::new(RecordService::new(repo, policy)) }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router with CORS and request tracing.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/data", post(records::list))
        .route("/api/data/:id", get(records::get))
        .route("/api/columns", get(records::columns));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                        // 5xx
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
