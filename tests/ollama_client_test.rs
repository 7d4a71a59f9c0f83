use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use trilha::application::ports::{SceneBackendError, SceneModelBackend};
use trilha::infrastructure::llm::{GenerateOptions, OllamaClient};

const MODEL: &str = "deepseek-r1:1.5b";

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn fake_ollama(answer: &'static str, captured: Arc<Mutex<Vec<Value>>>) -> String {
    let app = Router::new()
        .route(
            "/api/tags",
            get(|| async {
                Json(json!({
                    "models": [{"name": "deepseek-r1:1.5b"}, {"name": "llama3.1:latest"}]
                }))
            }),
        )
        .route(
            "/api/generate",
            post(move |Json(body): Json<Value>| {
                let captured = Arc::clone(&captured);
                async move {
                    captured.lock().unwrap().push(body);
                    Json(json!({ "response": answer, "done": true }))
                }
            }),
        );

    serve(app).await
}

fn client(base_url: &str) -> OllamaClient {
    OllamaClient::new(
        base_url,
        MODEL,
        GenerateOptions::default(),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn given_running_server_when_listing_models_then_returns_names() {
    let base_url = fake_ollama("", Arc::default()).await;

    let models = client(&base_url).list_models().await.unwrap();

    assert_eq!(models, vec!["deepseek-r1:1.5b", "llama3.1:latest"]);
}

#[tokio::test]
async fn given_prompt_when_generating_then_sends_non_streaming_request_with_options() {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let base_url = fake_ollama("{\"category\": \"urban\"}", Arc::clone(&captured)).await;

    let answer = client(&format!("{base_url}/"))
        .generate("Descreva a cena.")
        .await
        .unwrap();

    assert_eq!(answer, "{\"category\": \"urban\"}");

    let bodies = captured.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["model"], MODEL);
    assert_eq!(bodies[0]["prompt"], "Descreva a cena.");
    assert_eq!(bodies[0]["stream"], false);
    assert_eq!(bodies[0]["options"]["num_predict"], 150);
    assert!((bodies[0]["options"]["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
}

#[tokio::test]
async fn given_server_error_when_generating_then_returns_api_error() {
    let app = Router::new().route(
        "/api/generate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
    );
    let base_url = serve(app).await;

    let result = client(&base_url).generate("Descreva a cena.").await;

    match result {
        Err(SceneBackendError::ApiRequestFailed(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("model crashed"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_malformed_body_when_generating_then_returns_invalid_response() {
    let app = Router::new().route(
        "/api/generate",
        post(|| async { Json(json!({ "unexpected": true })) }),
    );
    let base_url = serve(app).await;

    let result = client(&base_url).generate("Descreva a cena.").await;

    assert!(matches!(result, Err(SceneBackendError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_closed_port_when_listing_models_then_reports_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client(&format!("http://{addr}")).list_models().await;

    assert!(matches!(result, Err(SceneBackendError::Unreachable(_))));
}

#[tokio::test]
async fn given_missing_tags_route_when_listing_models_then_reports_unreachable() {
    let base_url = serve(Router::new()).await;

    let result = client(&base_url).list_models().await;

    assert!(matches!(result, Err(SceneBackendError::Unreachable(_))));
}
