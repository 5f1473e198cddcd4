//! Domain models for Trimly
//!
//! Every persisted record uses camelCase field names, matching the names of
//! the collections they live in (`activityLog`, `satietyHistory`, ...).
//! Timestamps are local wall-clock times: the tracker is single-user and
//! on-device, so calendar days are always the user's local days.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Kind of activity that counts toward a streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Weight,
    Goal,
    Win,
    Restaurant,
    Swap,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Goal => "goal",
            Self::Win => "win",
            Self::Restaurant => "restaurant",
            Self::Swap => "swap",
        }
    }
}

impl std::str::FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weight" => Ok(Self::Weight),
            "goal" => Ok(Self::Goal),
            "win" => Ok(Self::Win),
            "restaurant" => Ok(Self::Restaurant),
            "swap" => Ok(Self::Swap),
            _ => Err(format!("Unknown activity type: {}", s)),
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One logged activity. At most one entry exists per (type, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub activity_type: ActivityType,
    pub date: NaiveDate,
    /// Opaque data attached by the caller (e.g. the weight that was logged)
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// A meal from the food log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    /// breakfast, lunch, dinner, snack
    pub meal_type: String,
    pub food_name: String,
    #[serde(default)]
    pub calories: u32,
    pub timestamp: NaiveDateTime,
}

/// How full a food kept the user
///
/// Preconditions (enforced by the caller): `rating` is 1-10 and
/// `hours_until_hungry` is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatietyRecord {
    pub food_name: String,
    pub rating: u8,
    pub hours_until_hungry: f64,
    pub meal_type: String,
    pub timestamp: NaiveDateTime,
}

/// How much sustained energy a food gave the user
///
/// Preconditions (enforced by the caller): `rating` is 1-10 and
/// `hours_sustained` is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyRecord {
    pub food_name: String,
    pub rating: u8,
    pub hours_sustained: f64,
    pub meal_type: String,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub crash_experienced: bool,
}

/// Water intake for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterLog {
    pub cups_today: u32,
    pub last_drink_time: Option<NaiveDateTime>,
    pub date: NaiveDate,
}

impl Default for WaterLog {
    fn default() -> Self {
        Self {
            cups_today: 0,
            last_drink_time: None,
            date: NaiveDate::default(),
        }
    }
}

impl WaterLog {
    /// Cups logged on `day`; a log stored for another day counts as zero
    pub fn cups_on(&self, day: NaiveDate) -> u32 {
        if self.date == day {
            self.cups_today
        } else {
            0
        }
    }

    /// The log as seen on `day`, reset if it was stored for a different day
    pub fn for_day(&self, day: NaiveDate) -> WaterLog {
        if self.date == day {
            self.clone()
        } else {
            WaterLog {
                cups_today: 0,
                last_drink_time: self.last_drink_time,
                date: day,
            }
        }
    }
}

/// A weigh-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    pub weight: f64,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl WeightEntry {
    pub fn recorded_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// A small daily win the user wants to remember
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWin {
    pub text: String,
    pub date: NaiveDate,
}

/// A single goal inside a day's goal list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoal {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// The goal list for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoalRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub goals: Vec<DailyGoal>,
}

impl DailyGoalRecord {
    pub fn completed(&self) -> usize {
        self.goals.iter().filter(|g| g.completed).count()
    }
}

// =============================================================================
// Survey profile
// =============================================================================

/// Why the user wants to lose weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MainReason {
    #[serde(rename = "health")]
    Health,
    #[serde(rename = "appearance")]
    Appearance,
    #[serde(rename = "energy")]
    Energy,
    #[serde(rename = "confidence")]
    Confidence,
    #[serde(rename = "doctor recommended")]
    DoctorRecommended,
    #[default]
    #[serde(other, rename = "other")]
    Other,
}

impl MainReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Appearance => "appearance",
            Self::Energy => "energy",
            Self::Confidence => "confidence",
            Self::DoctorRecommended => "doctor recommended",
            Self::Other => "other",
        }
    }

    pub fn all() -> &'static [MainReason] {
        &[
            Self::Health,
            Self::Appearance,
            Self::Energy,
            Self::Confidence,
            Self::DoctorRecommended,
            Self::Other,
        ]
    }
}

/// What the user finds hardest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BiggestChallenge {
    #[serde(rename = "emotional eating")]
    EmotionalEating,
    #[serde(rename = "cravings")]
    Cravings,
    #[serde(rename = "portion control")]
    PortionControl,
    #[serde(rename = "staying consistent")]
    StayingConsistent,
    #[serde(rename = "lack of time")]
    LackOfTime,
    #[default]
    #[serde(other, rename = "other")]
    Other,
}

impl BiggestChallenge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmotionalEating => "emotional eating",
            Self::Cravings => "cravings",
            Self::PortionControl => "portion control",
            Self::StayingConsistent => "staying consistent",
            Self::LackOfTime => "lack of time",
            Self::Other => "other",
        }
    }

    pub fn all() -> &'static [BiggestChallenge] {
        &[
            Self::EmotionalEating,
            Self::Cravings,
            Self::PortionControl,
            Self::StayingConsistent,
            Self::LackOfTime,
            Self::Other,
        ]
    }
}

/// When and how the user usually eats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EatingPattern {
    #[serde(rename = "night eater")]
    NightEater,
    #[serde(rename = "skip meals")]
    SkipMeals,
    #[serde(rename = "grazer")]
    Grazer,
    #[serde(rename = "weekend overeater")]
    WeekendOvereater,
    #[serde(rename = "regular meals")]
    RegularMeals,
    #[default]
    #[serde(other, rename = "other")]
    Other,
}

impl EatingPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NightEater => "night eater",
            Self::SkipMeals => "skip meals",
            Self::Grazer => "grazer",
            Self::WeekendOvereater => "weekend overeater",
            Self::RegularMeals => "regular meals",
            Self::Other => "other",
        }
    }

    pub fn all() -> &'static [EatingPattern] {
        &[
            Self::NightEater,
            Self::SkipMeals,
            Self::Grazer,
            Self::WeekendOvereater,
            Self::RegularMeals,
            Self::Other,
        ]
    }
}

/// How hungry the user usually feels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SatietyLevel {
    #[serde(rename = "always hungry")]
    AlwaysHungry,
    #[serde(rename = "hungry soon after eating")]
    HungrySoonAfter,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "rarely hungry")]
    RarelyHungry,
    #[default]
    #[serde(other, rename = "other")]
    Other,
}

impl SatietyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlwaysHungry => "always hungry",
            Self::HungrySoonAfter => "hungry soon after eating",
            Self::Normal => "normal",
            Self::RarelyHungry => "rarely hungry",
            Self::Other => "other",
        }
    }

    pub fn all() -> &'static [SatietyLevel] {
        &[
            Self::AlwaysHungry,
            Self::HungrySoonAfter,
            Self::Normal,
            Self::RarelyHungry,
            Self::Other,
        ]
    }
}

/// How fast the user wants to reach the goal weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "1 month")]
    OneMonth,
    #[serde(rename = "3 months")]
    ThreeMonths,
    #[serde(rename = "6 months")]
    SixMonths,
    #[serde(rename = "1 year")]
    OneYear,
    #[default]
    #[serde(other, rename = "no rush")]
    NoRush,
}

impl Timeline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1 month",
            Self::ThreeMonths => "3 months",
            Self::SixMonths => "6 months",
            Self::OneYear => "1 year",
            Self::NoRush => "no rush",
        }
    }

    pub fn all() -> &'static [Timeline] {
        &[
            Self::OneMonth,
            Self::ThreeMonths,
            Self::SixMonths,
            Self::OneYear,
            Self::NoRush,
        ]
    }
}

/// Self-reported daily movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[serde(rename = "sedentary")]
    Sedentary,
    #[serde(rename = "lightly active")]
    LightlyActive,
    #[serde(rename = "moderately active")]
    ModeratelyActive,
    #[serde(rename = "very active")]
    VeryActive,
    #[default]
    #[serde(other, rename = "other")]
    Other,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::LightlyActive => "lightly active",
            Self::ModeratelyActive => "moderately active",
            Self::VeryActive => "very active",
            Self::Other => "other",
        }
    }

    pub fn all() -> &'static [ActivityLevel] {
        &[
            Self::Sedentary,
            Self::LightlyActive,
            Self::ModeratelyActive,
            Self::VeryActive,
            Self::Other,
        ]
    }
}

/// Parse a survey answer, accepting either the stored phrase
/// ("night eater") or a snake_case spelling ("night_eater")
pub fn parse_survey_value<T: Copy>(
    s: &str,
    all: &[T],
    as_str: fn(&T) -> &'static str,
) -> std::result::Result<T, String> {
    let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
    all.iter()
        .find(|v| as_str(v) == wanted)
        .copied()
        .ok_or_else(|| {
            let options = all.iter().map(as_str).collect::<Vec<_>>().join(", ");
            format!("Unknown value '{}'. Expected one of: {}", s, options)
        })
}

/// Answers from the onboarding survey
///
/// Missing fields decode to defaults so that an older or partial survey still
/// loads. `current_weight` is the weight at the time of the survey and acts
/// as the starting weight for progress calculations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyProfile {
    pub main_reason: MainReason,
    pub biggest_challenge: BiggestChallenge,
    pub eating_pattern: EatingPattern,
    pub satiety_level: SatietyLevel,
    pub current_weight: f64,
    pub goal_weight: f64,
    pub timeline: Timeline,
    pub activity_level: ActivityLevel,
    pub problem_foods: Vec<String>,
}

impl SurveyProfile {
    /// Problem foods with duplicates (case-insensitive) and blanks removed
    pub fn distinct_problem_foods(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for food in &self.problem_foods {
            let trimmed = food.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !seen.iter().any(|s| s.eq_ignore_ascii_case(trimmed)) {
                seen.push(trimmed.to_string());
            }
        }
        seen
    }
}

// =============================================================================
// Behavior patterns
// =============================================================================

/// Area of behavior a pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    EatingPattern,
    ActivityLevel,
    ChallengeArea,
    FoodTriggers,
}

impl PatternCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EatingPattern => "eating_pattern",
            Self::ActivityLevel => "activity_level",
            Self::ChallengeArea => "challenge_area",
            Self::FoodTriggers => "food_triggers",
        }
    }
}

impl std::fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much a pattern contributes to weight-gain risk
///
/// Variant order defines the total order used for ranking: `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A diagnosed behavior that drives weight gain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorPattern {
    pub category: PatternCategory,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
    pub recommendations: Vec<String>,
}

/// Direction of recent progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTrend {
    Improving,
    Stable,
    Concerning,
}

impl ProgressTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Concerning => "concerning",
        }
    }
}

impl std::fmt::Display for ProgressTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Craving prediction
// =============================================================================

/// Likelihood of a craving in the next few hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "moderate" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Short-horizon craving forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CravingPrediction {
    pub risk_level: RiskLevel,
    /// Hours until the craving is expected
    pub time_until_craving: f64,
    pub reason: String,
    pub prevention: Vec<String>,
    /// 0-100
    pub confidence: u8,
}

impl CravingPrediction {
    /// The prediction returned whenever the model cannot be reached or its
    /// answer cannot be decoded
    pub fn fallback() -> Self {
        Self {
            risk_level: RiskLevel::Medium,
            time_until_craving: 2.0,
            reason: "Analysis unavailable".to_string(),
            prevention: vec![
                "Drink a glass of water".to_string(),
                "Have a protein-rich snack ready".to_string(),
                "Take a short walk".to_string(),
            ],
            confidence: 50,
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}
