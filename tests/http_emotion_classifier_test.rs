use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use trilha::application::ports::{EmotionClassifier, EmotionClassifierError};
use trilha::infrastructure::llm::HttpEmotionClassifier;

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn batched(Json(body): Json<Value>) -> impl IntoResponse {
    if body["inputs"].as_str().is_none_or(str::is_empty) {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"error": "no inputs"})));
    }
    (
        StatusCode::OK,
        Json(json!([[{"label": "joy", "score": 0.91}, {"label": "sadness", "score": 0.04}]])),
    )
}

async fn flat() -> impl IntoResponse {
    Json(json!([{"label": "anger", "score": 0.7}]))
}

async fn authenticated(headers: HeaderMap) -> impl IntoResponse {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some("Bearer secret-token") => (
            StatusCode::OK,
            Json(json!([{"label": "relief", "score": 0.6}])),
        ),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"}))),
    }
}

fn classifier(endpoint: String, api_key: Option<&str>) -> HttpEmotionClassifier {
    HttpEmotionClassifier::new(
        &endpoint,
        api_key.map(String::from),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn given_batched_payload_when_classifying_then_unwraps_first_batch() {
    let base_url = serve(Router::new().route("/classify", post(batched))).await;

    let scores = classifier(format!("{base_url}/classify"), None)
        .classify("Que dia feliz!")
        .await
        .unwrap();

    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].label, "joy");
    assert!((scores[0].score - 0.91).abs() < 1e-9);
}

#[tokio::test]
async fn given_flat_payload_when_classifying_then_returns_scores_in_order() {
    let base_url = serve(Router::new().route("/classify", post(flat))).await;

    let scores = classifier(format!("{base_url}/classify"), None)
        .classify("Que raiva!")
        .await
        .unwrap();

    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].label, "anger");
}

#[tokio::test]
async fn given_api_key_when_classifying_then_sends_bearer_token() {
    let base_url = serve(Router::new().route("/classify", post(authenticated))).await;

    let scores = classifier(format!("{base_url}/classify"), Some("secret-token"))
        .classify("Finalmente acabou.")
        .await
        .unwrap();

    assert_eq!(scores[0].label, "relief");
}

#[tokio::test]
async fn given_blank_api_key_when_classifying_then_sends_no_token() {
    let base_url = serve(Router::new().route("/classify", post(authenticated))).await;

    let result = classifier(format!("{base_url}/classify"), Some(""))
        .classify("Finalmente acabou.")
        .await;

    match result {
        Err(EmotionClassifierError::ApiRequestFailed(message)) => {
            assert!(message.contains("401"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_unexpected_payload_when_classifying_then_returns_invalid_response() {
    let app = Router::new().route(
        "/classify",
        post(|| async { Json(json!({"label": "joy"})) }),
    );
    let base_url = serve(app).await;

    let result = classifier(format!("{base_url}/classify"), None)
        .classify("Que dia feliz!")
        .await;

    assert!(matches!(
        result,
        Err(EmotionClassifierError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn given_empty_batch_when_classifying_then_returns_invalid_response() {
    let app = Router::new().route("/classify", post(|| async { Json(json!([])) }));
    let base_url = serve(app).await;

    let result = classifier(format!("{base_url}/classify"), None)
        .classify("Que dia feliz!")
        .await;

    assert!(matches!(
        result,
        Err(EmotionClassifierError::InvalidResponse(_))
    ));
}
