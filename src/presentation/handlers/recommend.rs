use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::domain::{AggregatedEmotion, EmotionStats, recommend_soundtrack};

use super::error::bad_request;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub aggregated: IndexMap<String, EmotionStats>,
}

pub async fn recommend_handler(Json(request): Json<RecommendRequest>) -> impl IntoResponse {
    if let Some((label, _)) = request
        .aggregated
        .iter()
        .find(|(_, stats)| !(0.0..=1.0).contains(&stats.mean_score))
    {
        return bad_request(format!("mean_score for {label} must be within [0, 1]"));
    }

    let aggregated: IndexMap<String, AggregatedEmotion> = request
        .aggregated
        .iter()
        .map(|(label, stats)| (label.clone(), AggregatedEmotion::from_stats(label, stats)))
        .collect();

    (StatusCode::OK, Json(recommend_soundtrack(&aggregated))).into_response()
}
