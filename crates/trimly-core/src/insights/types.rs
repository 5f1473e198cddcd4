//! Output types for the insight components

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{BehaviorPattern, ProgressTrend};

/// Active days this week and last week against the weekly goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProgress {
    /// Sunday starting the current week
    pub week_start: NaiveDate,
    pub this_week_days: u32,
    pub last_week_days: u32,
    pub goal_days: u32,
}

impl WeeklyProgress {
    pub fn goal_met(&self) -> bool {
        self.this_week_days >= self.goal_days
    }
}

/// Aggregated satiety ratings for one food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSatietyStat {
    pub food_name: String,
    pub average_rating: f64,
    pub average_hours_until_hungry: f64,
    pub samples: usize,
}

/// Ranked satiety summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatietyInsights {
    /// Up to five foods with the highest mean rating, best first
    pub top_foods: Vec<FoodSatietyStat>,
    /// Up to five foods with the lowest mean rating, worst first
    pub bottom_foods: Vec<FoodSatietyStat>,
    pub recommendation: String,
}

/// Aggregated energy ratings for one food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEnergyStat {
    pub food_name: String,
    pub average_rating: f64,
    pub average_hours_sustained: f64,
    /// Share of ratings with a crash, 0-100
    pub crash_rate: f64,
    pub samples: usize,
}

/// Ranked energy summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyInsights {
    pub top_foods: Vec<FoodEnergyStat>,
    pub bottom_foods: Vec<FoodEnergyStat>,
    /// Foods with a mean rating of 7 or more
    pub high_energy: Vec<FoodEnergyStat>,
    /// Foods that crash more than half the time or rate below 5
    pub low_energy: Vec<FoodEnergyStat>,
    pub recommendation: String,
}

/// Whether a hunger signal is more likely thirst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirstAssessment {
    pub cups_today: u32,
    pub hours_since_last_water: f64,
    pub hours_since_last_meal: f64,
    pub is_likely_thirst: bool,
    /// Calories saved by drinking instead of snacking
    pub estimated_calories_saved: u32,
    pub recommendation: String,
    pub assessed_at: NaiveDateTime,
}

/// Diagnosed behavior patterns with trend and next steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorAnalysis {
    /// Highest severity first
    pub patterns: Vec<BehaviorPattern>,
    pub progress_trend: ProgressTrend,
    /// 0-100
    pub confidence_level: u8,
    pub personalized_insights: Vec<String>,
    pub action_priority: Vec<String>,
}

/// Which rule produced a motivation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotivationKind {
    Progress,
    Comparison,
    NearGoal,
    GoalAchieved,
    Timeline,
    Onboarding,
}

impl MotivationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Progress => "progress",
            Self::Comparison => "comparison",
            Self::NearGoal => "near_goal",
            Self::GoalAchieved => "goal_achieved",
            Self::Timeline => "timeline",
            Self::Onboarding => "onboarding",
        }
    }
}

/// One motivational message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationInsight {
    pub kind: MotivationKind,
    pub title: String,
    pub message: String,
}

impl MotivationInsight {
    pub fn new(kind: MotivationKind, title: &str, message: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message,
        }
    }
}
