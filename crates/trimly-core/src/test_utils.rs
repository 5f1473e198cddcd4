//! Test utilities for trimly-core
//!
//! This module provides a mock text-generation server that speaks both the
//! Ollama and the OpenAI chat-completions dialects. The response text, an
//! artificial delay and a failure mode are configurable per server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// A well-formed craving prediction, as a model would answer it
pub const PREDICTION_RESPONSE: &str = r#"Based on the log, here is my prediction:
{"riskLevel": "high", "timeUntilCraving": 1.5, "reason": "Light lunch and little water since noon", "prevention": ["Drink two cups of water now", "Eat a handful of almonds at 3pm"], "confidence": 72}
Stay strong!"#;

/// How the mock server answers generation requests
#[derive(Debug, Clone)]
struct Behavior {
    /// Text returned as the model's completion; `None` answers with HTTP 500
    response: Option<String>,
    delay: Option<Duration>,
}

/// Mock text-generation server for testing and development
pub struct MockGenerationServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockGenerationServer {
    /// Start a server that answers with a valid craving prediction
    pub async fn start() -> Self {
        Self::start_with_response(PREDICTION_RESPONSE).await
    }

    /// Start a server that answers every request with `response`
    pub async fn start_with_response(response: &str) -> Self {
        Self::spawn(Behavior {
            response: Some(response.to_string()),
            delay: None,
        })
        .await
    }

    /// Start a server that waits `delay` before answering with `response`
    pub async fn start_delayed(response: &str, delay: Duration) -> Self {
        Self::spawn(Behavior {
            response: Some(response.to_string()),
            delay: Some(delay),
        })
        .await
    }

    /// Start a server that fails every generation request with HTTP 500
    pub async fn start_failing() -> Self {
        Self::spawn(Behavior {
            response: None,
            delay: None,
        })
        .await
    }

    async fn spawn(behavior: Behavior) -> Self {
        let app = Router::new()
            .route("/api/tags", get(handle_tags))
            .route("/api/generate", post(handle_generate))
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat))
            .with_state(Arc::new(behavior));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockGenerationServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn respond(behavior: &Behavior) -> Result<String, StatusCode> {
    if let Some(delay) = behavior.delay {
        tokio::time::sleep(delay).await;
    }
    behavior
        .response
        .clone()
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Ollama tags endpoint response (health check)
async fn handle_tags() -> Json<TagsResponse> {
    Json(TagsResponse {
        models: vec![ModelInfo {
            name: "llama3.2:latest".to_string(),
            modified_at: "2026-01-01T00:00:00Z".to_string(),
            size: 2_000_000_000,
        }],
    })
}

/// Ollama generate endpoint
async fn handle_generate(
    State(behavior): State<Arc<Behavior>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, StatusCode> {
    let response = respond(&behavior).await?;
    Ok(Json(GenerateResponse {
        model: request.model,
        response,
        done: true,
    }))
}

/// OpenAI models endpoint (health check)
async fn handle_models() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "object": "list",
        "data": [{"id": "mock-model", "object": "model"}]
    }))
}

/// OpenAI chat completions endpoint
async fn handle_chat(
    State(behavior): State<Arc<Behavior>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let content = respond(&behavior).await?;
    Ok(Json(serde_json::json!({
        "model": request.model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })))
}

#[derive(Serialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Serialize)]
struct ModelInfo {
    name: String,
    modified_at: String,
    size: u64,
}

#[derive(Deserialize)]
struct GenerateRequest {
    model: String,
    #[allow(dead_code)]
    prompt: String,
}

#[derive(Serialize)]
struct GenerateResponse {
    model: String,
    response: String,
    done: bool,
}

#[derive(Deserialize)]
struct ChatRequest {
    model: String,
}
