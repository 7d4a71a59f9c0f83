use std::num::NonZeroUsize;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::presentation::state::AppState;

use super::error::bad_request;

#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub pages: Vec<String>,
    #[serde(default)]
    pub pages_per_chunk: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ChapterRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub chunks: Option<Vec<String>>,
}

#[tracing::instrument(skip(state, request), fields(page_count = request.pages.len()))]
pub async fn analyze_document_handler(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> impl IntoResponse {
    let report = match request.pages_per_chunk {
        None => state.soundtrack_service.analyze_document(&request.pages).await,
        Some(size) => match NonZeroUsize::new(size) {
            Some(size) => {
                state
                    .soundtrack_service
                    .analyze_document_with(&request.pages, size)
                    .await
            }
            None => return bad_request("pages_per_chunk must be at least 1"),
        },
    };

    (StatusCode::OK, Json(report)).into_response()
}

#[tracing::instrument(skip(state, request))]
pub async fn analyze_chapter_handler(
    State(state): State<AppState>,
    Json(request): Json<ChapterRequest>,
) -> impl IntoResponse {
    let analysis = state
        .emotion_analyzer
        .analyze_chapter(&request.text, request.chunks.as_deref())
        .await;

    (StatusCode::OK, Json(analysis)).into_response()
}
