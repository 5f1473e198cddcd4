//! Ollama backend implementation
//!
//! HTTP client for the Ollama `/api/generate` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

use super::AIBackend;

/// Ollama backend
#[derive(Clone)]
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

/// Request to Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl AIBackend for OllamaBackend {
    async fn generate(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        let request = OllamaRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let ollama_response: OllamaResponse = response.json().await?;
        debug!("Ollama response: {}", ollama_response.response);

        Ok(ollama_response.response)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockGenerationServer;

    #[tokio::test]
    async fn test_generate_against_mock_server() {
        let server = MockGenerationServer::start_with_response("hello from the model").await;
        let backend = OllamaBackend::new(&server.url(), "llama3.2");

        assert!(backend.health_check().await);
        let text = backend.generate(Some("be brief"), "say hi").await.unwrap();
        assert_eq!(text, "hello from the model");
    }

    #[tokio::test]
    async fn test_http_error_status_is_an_error() {
        let server = MockGenerationServer::start_failing().await;
        let backend = OllamaBackend::new(&server.url(), "llama3.2");
        assert!(backend.generate(None, "say hi").await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unhealthy() {
        let backend = OllamaBackend::new("http://127.0.0.1:1", "llama3.2");
        assert!(!backend.health_check().await);
    }
}
