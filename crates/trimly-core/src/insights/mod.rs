//! Behavioral Insights Engine
//!
//! Stateless analyzers that read the journal and derive advisory signals.
//! Each analyzer borrows a [`Journal`](crate::journal::Journal), re-reads the
//! persisted logs on every call and returns plain data.
//!
//! ## Analyzers
//!
//! - **StreakTracker** - Activity streaks, weekly progress and badges
//! - **SatietyEnergyAnalyzer** - Per-food fullness and energy rankings
//! - **ThirstHungerClassifier** - Hunger or thirst from water and meal timing
//! - **BehaviorPatternAnalyzer** - Survey-driven pattern diagnosis
//! - **MotivationInsightGenerator** - Milestones and population comparisons
//! - **CravingPredictor** - AI-backed craving risk with a fixed fallback
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trimly_core::insights::{StreakTracker, CravingPredictor};
//!
//! let streak = StreakTracker::new(&journal).current_streak();
//! let prediction = CravingPredictor::from_config(&journal, &config).predict().await;
//! ```

pub mod behavior;
pub mod craving;
pub mod hydration;
pub mod motivation;
pub mod satiety;
pub mod streak;
pub mod types;

pub use behavior::BehaviorPatternAnalyzer;
pub use craving::{CravingPredictor, RenderedPrompt};
pub use hydration::ThirstHungerClassifier;
pub use motivation::{percentile, MotivationInsightGenerator};
pub use satiety::SatietyEnergyAnalyzer;
pub use streak::{week_start, StreakTracker};
pub use types::{
    BehaviorAnalysis, EnergyInsights, FoodEnergyStat, FoodSatietyStat, MotivationInsight,
    MotivationKind, SatietyInsights, ThirstAssessment, WeeklyProgress,
};
