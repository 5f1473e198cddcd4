//! Craving risk prediction
//!
//! Builds the `predict_craving` prompt from the journal, asks the configured
//! text-generation backend once and decodes the first JSON object of the
//! answer. Every failure (no backend, network, HTTP status, timeout, missing
//! or invalid JSON) yields [`CravingPrediction::fallback`].

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, warn};

use crate::ai::parsing::parse_craving_prediction;
use crate::ai::{AIBackend, AIClient};
use crate::config::Config;
use crate::context::ContextAssembler;
use crate::error::{Error, Result};
use crate::journal::Journal;
use crate::models::CravingPrediction;
use crate::prompts::{PromptId, PromptLibrary};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// A prompt ready to send
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    pub system: Option<String>,
    pub user: String,
}

/// Predicts near-term craving risk through an AI backend
pub struct CravingPredictor<'a> {
    journal: &'a Journal,
    ai: Option<AIClient>,
    prompts: Mutex<PromptLibrary>,
    timeout: Duration,
}

impl<'a> CravingPredictor<'a> {
    /// Predictor with embedded-or-overridden prompts and the default timeout
    ///
    /// Without a client every prediction is the fallback.
    pub fn new(journal: &'a Journal, ai: Option<AIClient>) -> Self {
        Self {
            journal,
            ai,
            prompts: Mutex::new(PromptLibrary::new()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Predictor using the configured backend and timeout
    pub fn from_config(journal: &'a Journal, config: &Config) -> Self {
        Self::new(journal, AIClient::from_settings(&config.ai)).with_timeout(config.ai.timeout)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_prompts(mut self, prompts: PromptLibrary) -> Self {
        self.prompts = Mutex::new(prompts);
        self
    }

    pub fn has_backend(&self) -> bool {
        self.ai.is_some()
    }

    pub async fn predict(&self) -> CravingPrediction {
        self.predict_at(Local::now().naive_local()).await
    }

    /// Predict as of `now`; never fails
    pub async fn predict_at(&self, now: NaiveDateTime) -> CravingPrediction {
        match self.try_predict_at(now).await {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(error = %e, "Craving prediction failed, using fallback");
                CravingPrediction::fallback()
            }
        }
    }

    /// Predict as of `now`, surfacing the reason a prediction failed
    pub async fn try_predict_at(&self, now: NaiveDateTime) -> Result<CravingPrediction> {
        let ai = self
            .ai
            .as_ref()
            .ok_or_else(|| Error::Config("No AI backend configured".to_string()))?;

        let prompt = self.render_prompt(now)?;
        debug!(model = ai.model(), host = ai.host(), "Requesting craving prediction");

        let response = tokio::time::timeout(
            self.timeout,
            ai.generate(prompt.system.as_deref(), &prompt.user),
        )
        .await
        .map_err(|_| Error::Timeout(self.timeout.as_secs()))??;

        parse_craving_prediction(&response)
    }

    /// The craving prompt filled with the journal's context at `now`
    pub fn render_prompt(&self, now: NaiveDateTime) -> Result<RenderedPrompt> {
        let context = ContextAssembler::new(self.journal).for_craving_prediction(now);
        let owned = context.to_template_vars();
        let vars: HashMap<&str, &str> = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let mut library = self
            .prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let prompt = library.get(PromptId::PredictCraving)?;

        Ok(RenderedPrompt {
            system: prompt.system_section().map(|s| s.trim().to_string()),
            user: prompt.render_user(&vars),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockBackend;
    use crate::models::{MealEntry, RiskLevel};
    use crate::test_utils::MockGenerationServer;
    use crate::tracker::Tracker;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap()
    }

    fn predictor(journal: &Journal, ai: Option<AIClient>) -> CravingPredictor<'_> {
        CravingPredictor::new(journal, ai).with_prompts(PromptLibrary::embedded_only())
    }

    #[tokio::test]
    async fn test_no_backend_falls_back() {
        let journal = Journal::in_memory();
        let predictor = predictor(&journal, None);
        assert!(!predictor.has_backend());
        assert!(predictor.predict_at(now()).await.is_fallback());
        assert!(matches!(
            predictor.try_predict_at(now()).await,
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_response_without_json_falls_back() {
        let journal = Journal::in_memory();
        let ai = AIClient::Mock(MockBackend::with_response(
            "I'm not sure, maybe eat something healthy?",
        ));
        let prediction = predictor(&journal, Some(ai)).predict_at(now()).await;

        assert!(prediction.is_fallback());
        assert_eq!(prediction.confidence, 50);
        assert_eq!(prediction.risk_level, RiskLevel::Medium);
    }

    #[tokio::test]
    async fn test_invalid_prediction_falls_back() {
        let journal = Journal::in_memory();
        let ai = AIClient::Mock(MockBackend::with_response(
            r#"{"riskLevel": "extreme", "timeUntilCraving": 1, "reason": "x", "prevention": ["y"], "confidence": 40}"#,
        ));
        assert!(predictor(&journal, Some(ai)).predict_at(now()).await.is_fallback());
    }

    #[tokio::test]
    async fn test_backend_error_falls_back() {
        let journal = Journal::in_memory();
        let ai = AIClient::Mock(MockBackend::unhealthy());
        assert!(predictor(&journal, Some(ai)).predict_at(now()).await.is_fallback());
    }

    #[tokio::test]
    async fn test_mock_prediction_decodes() {
        let journal = Journal::in_memory();
        let prediction = predictor(&journal, Some(AIClient::mock()))
            .predict_at(now())
            .await;

        assert!(!prediction.is_fallback());
        assert_eq!(prediction.risk_level, RiskLevel::Low);
        assert_eq!(prediction.confidence, 65);
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let journal = Journal::in_memory();
        let ai = AIClient::Mock(MockBackend::new().delayed(Duration::from_millis(500)));
        let predictor = predictor(&journal, Some(ai)).with_timeout(Duration::from_millis(20));

        assert!(matches!(
            predictor.try_predict_at(now()).await,
            Err(Error::Timeout(_))
        ));
        assert!(predictor.predict_at(now()).await.is_fallback());
    }

    #[tokio::test]
    async fn test_prediction_over_http() {
        let server = MockGenerationServer::start().await;
        let journal = Journal::in_memory();
        Tracker::new(&journal)
            .log_meal(MealEntry {
                meal_type: "lunch".to_string(),
                food_name: "salad".to_string(),
                calories: 320,
                timestamp: now() - chrono::Duration::hours(3),
            })
            .unwrap();

        let ai = AIClient::ollama(&server.url(), "llama3.2");
        let prediction = predictor(&journal, Some(ai)).predict_at(now()).await;

        assert_eq!(prediction.risk_level, RiskLevel::High);
        assert_eq!(prediction.time_until_craving, 1.5);
        assert_eq!(prediction.confidence, 72);
        assert_eq!(prediction.prevention.len(), 2);
    }

    #[tokio::test]
    async fn test_http_failure_falls_back() {
        let server = MockGenerationServer::start_failing().await;
        let journal = Journal::in_memory();
        let ai = AIClient::ollama(&server.url(), "llama3.2");
        assert!(predictor(&journal, Some(ai)).predict_at(now()).await.is_fallback());
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockGenerationServer::start_delayed(
            crate::test_utils::PREDICTION_RESPONSE,
            Duration::from_secs(2),
        )
        .await;
        let journal = Journal::in_memory();
        let ai = AIClient::ollama(&server.url(), "llama3.2");
        let prediction = predictor(&journal, Some(ai))
            .with_timeout(Duration::from_millis(100))
            .predict_at(now())
            .await;
        assert!(prediction.is_fallback());
    }

    #[test]
    fn test_prompt_embeds_context() {
        let journal = Journal::in_memory();
        Tracker::new(&journal)
            .log_meal(MealEntry {
                meal_type: "breakfast".to_string(),
                food_name: "oatmeal".to_string(),
                calories: 300,
                timestamp: now() - chrono::Duration::hours(7),
            })
            .unwrap();

        let prompt = predictor(&journal, None).render_prompt(now()).unwrap();
        assert!(prompt.user.contains("08:00 breakfast: oatmeal (300 cal)"));
        assert!(prompt.user.contains("Tuesday 15:00"));
        assert!(!prompt.user.contains("Current weight"));
        assert!(!prompt.user.contains("{{"));
        assert!(prompt.system.unwrap().contains("JSON"));
    }
}
