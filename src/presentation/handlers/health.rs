use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: &'static str,
    pub scene_backend_available: bool,
    pub scene_model_available: bool,
}

/// Always 200: a missing scene backend degrades results but does not stop the service.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (scene_backend_available, scene_model_available) = tokio::join!(
        state.environment_detector.is_backend_available(),
        state.environment_detector.is_model_available()
    );

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION"),
            scene_backend_available,
            scene_model_available,
        }),
    )
}
