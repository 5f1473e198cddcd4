//! Trimly Core Library
//!
//! Shared functionality for the Trimly habit tracker:
//! - Event log store with SQLite (SQLCipher) and in-memory adapters
//! - Typed journal repositories with per-collection locking
//! - Behavioral insights: streaks, satiety/energy rankings, thirst checks,
//!   behavior patterns, motivation and craving prediction
//! - Pluggable local AI backends (Ollama, OpenAI-compatible, mock)
//! - Prompt library for customizable AI prompts
//! - Context assembler for LLM prompt context

pub mod ai;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod insights;
pub mod journal;
pub mod models;
pub mod prompts;
pub mod store;
pub mod tracker;

/// Test utilities including a mock text-generation server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIBackend, AIClient, MockBackend, OllamaBackend, OpenAICompatibleBackend};
pub use config::{AiSettings, BackendKind, Config, TrackingSettings};
pub use context::{ContextAssembler, CravingContext};
pub use db::{CollectionStats, Database};
pub use error::{Error, Result};
pub use insights::{
    BehaviorPatternAnalyzer, CravingPredictor, MotivationInsightGenerator, SatietyEnergyAnalyzer,
    StreakTracker, ThirstHungerClassifier,
};
pub use journal::{Document, Journal, Record, Repository};
pub use prompts::{Prompt, PromptId, PromptInfo, PromptLibrary};
pub use store::{Collection, LogStore, MemoryStore};
pub use tracker::Tracker;
