//! Motivational messages from weight progress
//!
//! Candidates are produced in a fixed priority order (progress, population
//! comparison, near goal, goal achieved, timeline) and the first two are
//! returned.

use crate::journal::Journal;
use crate::models::{SurveyProfile, Timeline, WeightEntry};

use super::types::{MotivationInsight, MotivationKind};

const MAX_INSIGHTS: usize = 2;

/// Adult weight (lbs) to population percentile, ascending
const PERCENTILE_TABLE: &[(f64, u8)] = &[
    (110.0, 5),
    (120.0, 10),
    (130.0, 20),
    (140.0, 30),
    (150.0, 40),
    (160.0, 50),
    (170.0, 60),
    (180.0, 70),
    (190.0, 78),
    (200.0, 85),
    (220.0, 90),
    (250.0, 95),
];
const PERCENTILE_CEILING: u8 = 98;

/// Loss milestones (lbs), highest first
const MILESTONES: &[(f64, &str)] = &[
    (30.0, "a 4-year-old child"),
    (25.0, "a car tire"),
    (20.0, "a Thanksgiving turkey"),
    (15.0, "a bowling ball"),
    (10.0, "a house cat"),
    (5.0, "a bag of flour"),
];

/// Remaining-weight comparisons (lbs), highest first
const NEAR_GOAL_OBJECTS: &[(f64, &str)] = &[
    (8.0, "a gallon of milk"),
    (4.5, "a brick"),
    (4.0, "a bag of sugar"),
    (2.0, "a pineapple"),
    (0.0, "a loaf of bread"),
];

/// Percentile of the first breakpoint at or above `weight`
pub fn percentile(weight: f64) -> u8 {
    PERCENTILE_TABLE
        .iter()
        .find(|(breakpoint, _)| *breakpoint >= weight)
        .map(|(_, p)| *p)
        .unwrap_or(PERCENTILE_CEILING)
}

/// Builds motivation from the survey and weigh-in history
pub struct MotivationInsightGenerator<'a> {
    journal: &'a Journal,
}

impl<'a> MotivationInsightGenerator<'a> {
    pub fn new(journal: &'a Journal) -> Self {
        Self { journal }
    }

    pub fn insights(&self) -> Vec<MotivationInsight> {
        let profile = self.journal.load::<SurveyProfile>();
        let weights = self.journal.repo::<WeightEntry>().newest_first();
        generate(profile.as_ref(), &weights)
    }
}

/// Pounds per week between the two latest weigh-ins, if they show a loss
///
/// Weigh-ins less than a day apart report the raw difference.
fn momentum_rate(weights: &[WeightEntry]) -> Option<f64> {
    let (newest, previous) = match weights {
        [newest, previous, ..] => (newest, previous),
        _ => return None,
    };
    let lost = previous.weight - newest.weight;
    if lost <= 0.0 {
        return None;
    }

    let days = (newest.recorded_at() - previous.recorded_at()).num_seconds() as f64 / 86_400.0;
    if days < 1.0 {
        Some(lost)
    } else {
        Some(lost / (days / 7.0))
    }
}

fn timeline_message(timeline: Timeline) -> &'static str {
    match timeline {
        Timeline::OneMonth => {
            "A month is a sprint. Small daily wins add up faster than you think."
        }
        Timeline::ThreeMonths => {
            "Three months is enough time to build habits that last. Focus on this week."
        }
        Timeline::SixMonths => {
            "Six months gives you room for steady, sustainable progress. Consistency beats speed."
        }
        Timeline::OneYear => {
            "A year-long plan means every healthy choice compounds. Keep stacking them."
        }
        Timeline::NoRush => {
            "No rush means no pressure. Every healthy choice still moves you forward."
        }
    }
}

fn progress(profile: &SurveyProfile, lost: f64) -> MotivationInsight {
    if let Some((_, object)) = MILESTONES.iter().find(|(lbs, _)| lost >= *lbs) {
        return MotivationInsight::new(
            MotivationKind::Progress,
            "Milestone reached",
            format!(
                "You've lost {:.1} lbs. That's the weight of {}!",
                lost, object
            ),
        );
    }

    let to_lose = profile.current_weight - profile.goal_weight;
    let percent = if to_lose > 0.0 {
        (lost / to_lose * 100.0).clamp(0.0, 100.0)
    } else {
        100.0
    };
    MotivationInsight::new(
        MotivationKind::Progress,
        "Making progress",
        format!(
            "You've lost {:.1} lbs, {:.0}% of the way to your goal.",
            lost, percent
        ),
    )
}

fn comparison(profile: &SurveyProfile, current: f64) -> MotivationInsight {
    let lighter_than = 100 - percentile(current);
    let message = if current > profile.goal_weight {
        let at_goal = 100 - percentile(profile.goal_weight);
        format!(
            "At {:.1} lbs you're lighter than {}% of adults. Reaching {:.1} lbs puts you lighter than {}%.",
            current, lighter_than, profile.goal_weight, at_goal
        )
    } else {
        format!(
            "At {:.1} lbs you're lighter than {}% of adults. You're right where you wanted to be.",
            current, lighter_than
        )
    };
    MotivationInsight::new(MotivationKind::Comparison, "How you compare", message)
}

fn near_goal(remaining: f64) -> Option<MotivationInsight> {
    if remaining <= 0.0 || remaining > 10.0 {
        return None;
    }
    let (_, object) = NEAR_GOAL_OBJECTS
        .iter()
        .find(|(lbs, _)| remaining >= *lbs)?;
    Some(MotivationInsight::new(
        MotivationKind::NearGoal,
        "Almost there",
        format!(
            "Only {:.1} lbs to go, about the weight of {}.",
            remaining, object
        ),
    ))
}

/// Up to two insights, highest priority first
///
/// `weights` is newest first. The current weight is the newest weigh-in, or
/// the survey's starting weight when nothing has been logged.
pub fn generate(profile: Option<&SurveyProfile>, weights: &[WeightEntry]) -> Vec<MotivationInsight> {
    let Some(profile) = profile else {
        return vec![MotivationInsight::new(
            MotivationKind::Onboarding,
            "Let's get started",
            "Complete your profile survey and log your first weigh-in to see your progress here."
                .to_string(),
        )];
    };

    let current = weights
        .first()
        .map(|w| w.weight)
        .unwrap_or(profile.current_weight);
    let lost = profile.current_weight - current;
    let remaining = current - profile.goal_weight;

    let mut candidates = Vec::new();
    if lost > 0.0 {
        candidates.push(progress(profile, lost));
    }
    candidates.push(comparison(profile, current));
    if let Some(insight) = near_goal(remaining) {
        candidates.push(insight);
    }
    if remaining <= 0.0 {
        candidates.push(MotivationInsight::new(
            MotivationKind::GoalAchieved,
            "Goal achieved",
            format!(
                "You reached your goal of {:.1} lbs. Time to set the next one!",
                profile.goal_weight
            ),
        ));
    }
    let timeline = match momentum_rate(weights) {
        Some(rate) => format!(
            "You're losing about {:.1} lbs per week. Keep the momentum going!",
            rate
        ),
        None => timeline_message(profile.timeline).to_string(),
    };
    candidates.push(MotivationInsight::new(
        MotivationKind::Timeline,
        "Your pace",
        timeline,
    ));

    candidates.truncate(MAX_INSIGHTS);
    candidates
}
