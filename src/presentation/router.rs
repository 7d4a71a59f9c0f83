use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    analyze_chapter_handler, analyze_document_handler, analyze_emotion_handler,
    analyze_environment_handler, health_handler, recommend_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/analyze/document", post(analyze_document_handler))
        .route("/api/v1/analyze/chapter", post(analyze_chapter_handler))
        .route("/api/v1/analyze/emotion", post(analyze_emotion_handler))
        .route(
            "/api/v1/analyze/environment",
            post(analyze_environment_handler),
        )
        .route("/api/v1/recommend", post(recommend_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
