//! Pluggable text-generation backend abstraction
//!
//! The insights engine needs exactly one thing from a language model: given a
//! rendered prompt, return free text. Everything else (prompt rendering,
//! decoding, fallbacks) happens on the caller's side.
//!
//! # Architecture
//!
//! - `AIBackend` trait: the interface every backend implements
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OllamaBackend`, `OpenAICompatibleBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (ollama, openai_compatible, mock). Default: ollama
//! - `OLLAMA_HOST`: Ollama server URL (required for ollama backend)
//! - `OLLAMA_MODEL`: Default model name (default: llama3.2)
//! - `OPENAI_COMPATIBLE_HOST`: Server URL (required for openai_compatible backend)
//! - `OPENAI_COMPATIBLE_MODEL`: Model name
//! - `OPENAI_COMPATIBLE_API_KEY`: API key if required (optional)

mod mock;
mod ollama;
mod openai_compatible;
pub mod parsing;

pub use mock::MockBackend;
pub use ollama::OllamaBackend;
pub use openai_compatible::OpenAICompatibleBackend;

use async_trait::async_trait;

use crate::config::{AiSettings, BackendKind};
use crate::error::Result;

/// Trait defining the interface for all text-generation backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Generate a completion for `prompt`, optionally steered by a system prompt
    async fn generate(&self, system: Option<&str>, prompt: &str) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// OpenAI-compatible backend (Docker Model Runner, vLLM, LocalAI, llama-server, etc.)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from resolved settings
    ///
    /// Returns None for HTTP backends without a host.
    pub fn from_settings(settings: &AiSettings) -> Option<Self> {
        match settings.backend {
            BackendKind::Mock => Some(AIClient::Mock(MockBackend::new())),
            BackendKind::Ollama => {
                let host = settings.host.as_deref()?;
                Some(AIClient::Ollama(OllamaBackend::new(host, &settings.model)))
            }
            BackendKind::OpenAICompatible => {
                let host = settings.host.as_deref()?;
                let backend = match settings.api_key.as_deref() {
                    Some(key) => OpenAICompatibleBackend::with_api_key(host, &settings.model, key),
                    None => OpenAICompatibleBackend::new(host, &settings.model),
                };
                Some(AIClient::OpenAICompatible(backend))
            }
        }
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str) -> Self {
        AIClient::Ollama(OllamaBackend::new(host, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Backend name for display
    pub fn kind(&self) -> BackendKind {
        match self {
            AIClient::Ollama(_) => BackendKind::Ollama,
            AIClient::OpenAICompatible(_) => BackendKind::OpenAICompatible,
            AIClient::Mock(_) => BackendKind::Mock,
        }
    }
}

// Implement AIBackend for AIClient by delegating to the inner backend
#[async_trait]
impl AIBackend for AIClient {
    async fn generate(&self, system: Option<&str>, prompt: &str) -> Result<String> {
        match self {
            AIClient::Ollama(b) => b.generate(system, prompt).await,
            AIClient::OpenAICompatible(b) => b.generate(system, prompt).await,
            AIClient::Mock(b) => b.generate(system, prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::OpenAICompatible(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.model(),
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.host(),
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_client_mock() {
        let client = AIClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
        assert_eq!(client.kind(), BackendKind::Mock);
    }

    #[test]
    fn test_from_settings_requires_host() {
        let settings = AiSettings::default();
        assert!(AIClient::from_settings(&settings).is_none());

        let settings = AiSettings {
            host: Some("http://localhost:11434/".to_string()),
            ..AiSettings::default()
        };
        let client = AIClient::from_settings(&settings).unwrap();
        assert_eq!(client.kind(), BackendKind::Ollama);
        assert_eq!(client.host(), "http://localhost:11434");
        assert_eq!(client.model(), "llama3.2");
    }

    #[test]
    fn test_from_settings_openai_compatible() {
        let settings = AiSettings {
            backend: BackendKind::OpenAICompatible,
            host: Some("http://localhost:8000".to_string()),
            model: "qwen2.5".to_string(),
            ..AiSettings::default()
        };
        let client = AIClient::from_settings(&settings).unwrap();
        assert_eq!(client.kind(), BackendKind::OpenAICompatible);
        assert_eq!(client.model(), "qwen2.5");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = AIClient::mock();
        assert!(client.health_check().await);
    }
}
