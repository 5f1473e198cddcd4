//! Mock backend for testing
//!
//! Returns a canned completion without any network access. The response,
//! an artificial delay and failure can be configured per test.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::AIBackend;

/// Completion returned by a default mock
const DEFAULT_RESPONSE: &str = r#"{"riskLevel": "low", "timeUntilCraving": 4, "reason": "Balanced meals and steady hydration today", "prevention": ["Keep a water bottle nearby", "Plan an afternoon snack"], "confidence": 65}"#;

/// Mock AI backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    /// Completion text; `None` makes `generate` fail
    pub response: Option<String>,
    /// Sleep before answering
    pub delay: Option<Duration>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy, answers with a valid prediction)
    pub fn new() -> Self {
        Self {
            healthy: true,
            response: Some(DEFAULT_RESPONSE.to_string()),
            delay: None,
        }
    }

    /// Create an unhealthy mock backend whose requests fail
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            response: None,
            delay: None,
        }
    }

    /// Answer every request with `response`
    pub fn with_response(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            ..Self::new()
        }
    }

    /// Wait `delay` before answering
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn generate(&self, _system: Option<&str>, _prompt: &str) -> Result<String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response
            .clone()
            .ok_or_else(|| Error::InvalidData("Mock backend configured to fail".into()))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
