use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::presentation::state::AppState;

use super::error::bad_request;

#[derive(Debug, Deserialize)]
pub struct EmotionRequest {
    pub text: String,
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[tracing::instrument(skip(state, request))]
pub async fn analyze_emotion_handler(
    State(state): State<AppState>,
    Json(request): Json<EmotionRequest>,
) -> impl IntoResponse {
    let threshold = request
        .threshold
        .unwrap_or(state.emotion_analyzer.options().threshold);

    if !(0.0..=1.0).contains(&threshold) {
        return bad_request(format!("threshold must be within [0, 1], got {threshold}"));
    }

    let analysis = state
        .emotion_analyzer
        .analyze_chunk_with_threshold(&request.text, threshold)
        .await;

    (StatusCode::OK, Json(analysis)).into_response()
}
