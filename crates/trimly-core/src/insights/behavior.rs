//! Behavior pattern diagnosis
//!
//! Each survey dimension maps to at most one [`BehaviorPattern`] through a
//! fixed lookup. Dimensions are checked in a fixed order (eating pattern,
//! biggest challenge, activity level, problem foods) and the resulting list
//! is stably sorted by severity, so equal severities keep that order.

use chrono::NaiveDate;

use crate::journal::Journal;
use crate::models::{
    ActivityLevel, BehaviorPattern, BiggestChallenge, EatingPattern, PatternCategory,
    ProgressTrend, Severity, SurveyProfile, WeightEntry,
};
use crate::tracker::Tracker;

use super::streak::StreakTracker;
use super::types::BehaviorAnalysis;

const MAX_INSIGHTS: usize = 2;
const MAX_ACTIONS: usize = 3;
/// Weigh-ins considered for the trend
const TREND_WINDOW: usize = 4;
/// Days of goal history behind the completion rate
const COMPLETION_WINDOW_DAYS: u32 = 7;

const LOW_COMPLETION: f64 = 0.3;

const PROFILE_MISSING_INSIGHT: &str =
    "Complete your profile survey to unlock personalized behavior insights.";

/// Diagnoses weight-gain drivers from the survey and recent progress
pub struct BehaviorPatternAnalyzer<'a> {
    journal: &'a Journal,
}

impl<'a> BehaviorPatternAnalyzer<'a> {
    pub fn new(journal: &'a Journal) -> Self {
        Self { journal }
    }

    /// Gather profile, weigh-ins, the 7-day goal completion rate and the streak
    pub fn analyze_on(&self, today: NaiveDate) -> BehaviorAnalysis {
        let tracker = Tracker::new(self.journal);
        let profile = tracker.survey();
        let weights = self.journal.repo::<WeightEntry>().newest_first();
        let completion_rate = tracker.goal_completion_rate(today, COMPLETION_WINDOW_DAYS);
        let streak = StreakTracker::new(self.journal).current_streak_on(today);

        analyze(profile.as_ref(), &weights, completion_rate, streak)
    }
}

fn pattern(
    category: PatternCategory,
    severity: Severity,
    description: &str,
    impact: &str,
    recommendations: &[&str],
) -> BehaviorPattern {
    BehaviorPattern {
        category,
        severity,
        description: description.to_string(),
        impact: impact.to_string(),
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
    }
}

fn low_completion_severity(completion_rate: f64) -> Severity {
    if completion_rate < LOW_COMPLETION {
        Severity::High
    } else {
        Severity::Medium
    }
}

fn eating_pattern(profile: &SurveyProfile, completion_rate: f64) -> Option<BehaviorPattern> {
    let found = match profile.eating_pattern {
        EatingPattern::NightEater => pattern(
            PatternCategory::EatingPattern,
            low_completion_severity(completion_rate),
            "Late-night eating",
            "Evening calories are often eaten out of habit or fatigue rather than hunger",
            &[
                "Set a kitchen-closed time two hours before bed",
                "Eat a protein-rich dinner so evenings start satisfied",
                "Swap the night snack for herbal tea",
            ],
        ),
        EatingPattern::SkipMeals => pattern(
            PatternCategory::EatingPattern,
            Severity::Medium,
            "Skipping meals",
            "Long gaps without food lead to overeating at the next meal",
            &[
                "Eat something within two hours of waking",
                "Keep a protein snack on hand for busy days",
                "Plan three regular meal times",
            ],
        ),
        EatingPattern::Grazer => pattern(
            PatternCategory::EatingPattern,
            Severity::Medium,
            "Grazing through the day",
            "Small bites add up to large, untracked calorie totals",
            &[
                "Plate every snack instead of eating from the package",
                "Schedule snack times instead of eating on cue",
                "Log snacks as they happen",
            ],
        ),
        EatingPattern::WeekendOvereater => pattern(
            PatternCategory::EatingPattern,
            Severity::Medium,
            "Weekend overeating",
            "Two loose days can undo five days of steady progress",
            &[
                "Plan weekend meals on Friday",
                "Keep one weekend treat meal, not a treat weekend",
                "Weigh in on Monday mornings to stay accountable",
            ],
        ),
        EatingPattern::RegularMeals | EatingPattern::Other => return None,
    };
    Some(found)
}

fn challenge(profile: &SurveyProfile, completion_rate: f64) -> Option<BehaviorPattern> {
    let found = match profile.biggest_challenge {
        BiggestChallenge::EmotionalEating => pattern(
            PatternCategory::ChallengeArea,
            Severity::High,
            "Emotional eating",
            "Eating to cope with stress or boredom bypasses hunger signals entirely",
            &[
                "Pause for five minutes and name the feeling before eating",
                "Write down three non-food ways to unwind",
                "Log your mood alongside meals",
            ],
        ),
        BiggestChallenge::Cravings => pattern(
            PatternCategory::ChallengeArea,
            Severity::Medium,
            "Strong cravings",
            "Unplanned cravings drive most off-plan calories",
            &[
                "Drink a glass of water when a craving hits",
                "Keep a satisfying swap ready for your top craving",
                "Check the craving prediction before your risky hours",
            ],
        ),
        BiggestChallenge::PortionControl => pattern(
            PatternCategory::ChallengeArea,
            Severity::Medium,
            "Portion control",
            "Healthy foods still add up when portions grow",
            &[
                "Use a smaller plate for dinner",
                "Fill half the plate with vegetables first",
                "Serve food in the kitchen, not at the table",
            ],
        ),
        BiggestChallenge::StayingConsistent => pattern(
            PatternCategory::ChallengeArea,
            low_completion_severity(completion_rate),
            "Staying consistent",
            "Progress stalls when healthy habits come and go",
            &[
                "Pick one tiny daily goal and protect your streak",
                "Log something every day, even on off days",
                "Set a daily reminder at the same time",
            ],
        ),
        BiggestChallenge::LackOfTime => pattern(
            PatternCategory::ChallengeArea,
            Severity::Low,
            "Limited time",
            "Busy schedules push meals toward convenience food",
            &[
                "Batch-cook two lunches on Sunday",
                "Keep a list of healthy quick options nearby",
                "Prep tomorrow's breakfast tonight",
            ],
        ),
        BiggestChallenge::Other => return None,
    };
    Some(found)
}

fn activity(profile: &SurveyProfile) -> Option<BehaviorPattern> {
    let found = match profile.activity_level {
        ActivityLevel::Sedentary => pattern(
            PatternCategory::ActivityLevel,
            Severity::Medium,
            "Mostly sedentary days",
            "Low daily movement shrinks your calorie budget",
            &[
                "Take a 10-minute walk after lunch",
                "Stand up and move once every hour",
                "Aim for 5,000 steps, then build from there",
            ],
        ),
        ActivityLevel::LightlyActive => pattern(
            PatternCategory::ActivityLevel,
            Severity::Low,
            "Light activity",
            "A little more movement would speed up progress",
            &[
                "Add two brisk walks a week",
                "Take the stairs when you can",
                "Try a short bodyweight routine twice a week",
            ],
        ),
        ActivityLevel::ModeratelyActive | ActivityLevel::VeryActive | ActivityLevel::Other => {
            return None
        }
    };
    Some(found)
}

fn food_triggers(profile: &SurveyProfile) -> Option<BehaviorPattern> {
    let foods = profile.distinct_problem_foods();
    if foods.is_empty() {
        return None;
    }

    let severity = if foods.len() >= 3 {
        Severity::High
    } else {
        Severity::Medium
    };
    let first = foods[0].clone();
    Some(BehaviorPattern {
        category: PatternCategory::FoodTriggers,
        severity,
        description: format!("Trigger foods: {}", foods.join(", ")),
        impact: "Trigger foods are hard to stop once started".to_string(),
        recommendations: vec![
            format!("Keep {} out of the house this week", first),
            "Plan a satisfying swap for each trigger food".to_string(),
            "Eat trigger foods only from a single plated portion".to_string(),
        ],
    })
}

/// Diagnosed patterns, severity descending
pub fn detect_patterns(profile: &SurveyProfile, completion_rate: f64) -> Vec<BehaviorPattern> {
    let mut patterns: Vec<BehaviorPattern> = [
        eating_pattern(profile, completion_rate),
        challenge(profile, completion_rate),
        activity(profile),
        food_triggers(profile),
    ]
    .into_iter()
    .flatten()
    .collect();

    // stable: equal severities keep dimension order
    patterns.sort_by(|a, b| b.severity.cmp(&a.severity));
    patterns
}

/// Trend over the most recent weigh-ins (newest first)
pub fn progress_trend(weights: &[WeightEntry], completion_rate: f64) -> ProgressTrend {
    if weights.len() < 2 {
        return if completion_rate > 0.6 {
            ProgressTrend::Improving
        } else {
            ProgressTrend::Stable
        };
    }

    let recent = &weights[..weights.len().min(TREND_WINDOW)];
    let newest = recent[0].weight;
    let oldest = recent[recent.len() - 1].weight;
    let delta = newest - oldest;

    if delta < -1.0 && completion_rate > 0.5 {
        ProgressTrend::Improving
    } else if delta > 2.0 || completion_rate < LOW_COMPLETION {
        ProgressTrend::Concerning
    } else {
        ProgressTrend::Stable
    }
}

/// 0 without a profile, else 60 plus 20 each for 3 and 7 weigh-ins
pub fn confidence_level(has_profile: bool, weight_entries: usize) -> u8 {
    if !has_profile {
        return 0;
    }
    let mut confidence: u32 = 60;
    if weight_entries >= 3 {
        confidence += 20;
    }
    if weight_entries >= 7 {
        confidence += 20;
    }
    confidence.min(100) as u8
}

fn trend_insight(trend: ProgressTrend, streak: u32) -> String {
    match trend {
        ProgressTrend::Improving if streak >= 3 => format!(
            "Your weight is trending down and you're on a {}-day streak. Keep this rhythm going.",
            streak
        ),
        ProgressTrend::Improving => {
            "Your weight is trending down. Log daily to turn it into a streak.".to_string()
        }
        ProgressTrend::Stable if streak >= 3 => format!(
            "Your weight is holding steady through a {}-day streak. One small change can get it moving.",
            streak
        ),
        ProgressTrend::Stable => {
            "Your weight is holding steady. One small change can get it moving.".to_string()
        }
        ProgressTrend::Concerning => {
            "Your recent trend needs attention. Focus on a single habit this week.".to_string()
        }
    }
}

fn trend_action(trend: ProgressTrend) -> &'static str {
    match trend {
        ProgressTrend::Improving => "Keep weighing in weekly to protect your momentum",
        ProgressTrend::Stable => "Add one new healthy habit this week",
        ProgressTrend::Concerning => "Log every meal for the next three days",
    }
}

/// Full analysis from explicit inputs
///
/// `weights` is newest first; `completion_rate` is 0-1.
pub fn analyze(
    profile: Option<&SurveyProfile>,
    weights: &[WeightEntry],
    completion_rate: f64,
    streak: u32,
) -> BehaviorAnalysis {
    let progress_trend = progress_trend(weights, completion_rate);

    let Some(profile) = profile else {
        return BehaviorAnalysis {
            patterns: Vec::new(),
            progress_trend,
            confidence_level: 0,
            personalized_insights: vec![PROFILE_MISSING_INSIGHT.to_string()],
            action_priority: Vec::new(),
        };
    };

    let patterns = detect_patterns(profile, completion_rate);

    let mut personalized_insights = Vec::with_capacity(MAX_INSIGHTS);
    if let Some(top) = patterns.first() {
        let mut insight = format!("{}: {}.", top.description, top.impact);
        if let Some(first) = top.recommendations.first() {
            insight.push_str(&format!(" Start here: {}.", first));
        }
        personalized_insights.push(insight);
    }
    personalized_insights.push(trend_insight(progress_trend, streak));
    personalized_insights.truncate(MAX_INSIGHTS);

    let mut action_priority: Vec<String> = Vec::with_capacity(MAX_ACTIONS);
    let candidates = patterns
        .iter()
        .filter_map(|p| p.recommendations.first().cloned())
        .chain(std::iter::once(trend_action(progress_trend).to_string()));
    for action in candidates {
        if action_priority.len() == MAX_ACTIONS {
            break;
        }
        if !action_priority.contains(&action) {
            action_priority.push(action);
        }
    }

    BehaviorAnalysis {
        patterns,
        progress_trend,
        confidence_level: confidence_level(true, weights.len()),
        personalized_insights,
        action_priority,
    }
}
