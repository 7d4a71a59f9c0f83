use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn bad_request(message: impl Into<String>) -> Response {
    let error = message.into();
    tracing::warn!(error = %error, "Rejected request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}
