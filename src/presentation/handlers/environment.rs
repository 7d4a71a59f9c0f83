use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnvironmentRequest {
    pub text: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn analyze_environment_handler(
    State(state): State<AppState>,
    Json(request): Json<EnvironmentRequest>,
) -> impl IntoResponse {
    let analysis = state.environment_detector.detect(&request.text).await;

    (StatusCode::OK, Json(analysis))
}
