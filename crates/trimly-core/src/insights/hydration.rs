//! Hunger or thirst?
//!
//! A stateless heuristic over today's water log and meal times. Missing data
//! never fails the assessment: it falls back to fixed assumptions.

use chrono::NaiveDateTime;

use crate::journal::Journal;
use crate::models::{MealEntry, WaterLog};
use crate::tracker::Tracker;

use super::types::ThirstAssessment;

/// Assumed when no meal was logged today
pub const DEFAULT_HOURS_SINCE_MEAL: f64 = 5.0;
/// Assumed when water was never logged
pub const DEFAULT_HOURS_SINCE_WATER: f64 = 3.0;
/// Calories of the snack a glass of water replaces
pub const THIRST_CALORIES_SAVED: u32 = 250;

/// Classifies a hunger signal from stored water and meal logs
pub struct ThirstHungerClassifier<'a> {
    journal: &'a Journal,
}

impl<'a> ThirstHungerClassifier<'a> {
    pub fn new(journal: &'a Journal) -> Self {
        Self { journal }
    }

    pub fn assess_at(&self, now: NaiveDateTime) -> ThirstAssessment {
        let tracker = Tracker::new(self.journal);
        let water = tracker.water_on(now.date());
        let meals = tracker.meals_on(now.date());
        assess(&water, &meals, now)
    }
}

/// The classification rule
pub fn classify(cups_today: u32, hours_since_last_water: f64, hours_since_last_meal: f64) -> bool {
    cups_today < 4
        || hours_since_last_water > 2.0
        || (hours_since_last_meal < 2.5 && cups_today < 6)
}

fn hours_between(earlier: NaiveDateTime, now: NaiveDateTime) -> f64 {
    ((now - earlier).num_seconds() as f64 / 3600.0).max(0.0)
}

/// Assess from today's water log and today's meals
pub fn assess(water: &WaterLog, meals_today: &[MealEntry], now: NaiveDateTime) -> ThirstAssessment {
    let cups_today = water.cups_on(now.date());

    let hours_since_last_water = water
        .last_drink_time
        .map(|t| hours_between(t, now))
        .unwrap_or(DEFAULT_HOURS_SINCE_WATER);

    let hours_since_last_meal = meals_today
        .iter()
        .filter(|m| m.timestamp.date() == now.date() && m.timestamp <= now)
        .map(|m| m.timestamp)
        .max()
        .map(|t| hours_between(t, now))
        .unwrap_or(DEFAULT_HOURS_SINCE_MEAL);

    let is_likely_thirst = classify(cups_today, hours_since_last_water, hours_since_last_meal);

    let recommendation = if is_likely_thirst {
        format!(
            "You may just be thirsty: {} cups so far today, last one {:.1} hours ago. Drink a glass of water and check in again in 15 minutes.",
            cups_today, hours_since_last_water
        )
    } else {
        format!(
            "This looks like real hunger: your last meal was {:.1} hours ago. Reach for a snack with protein and fiber.",
            hours_since_last_meal
        )
    };

    ThirstAssessment {
        cups_today,
        hours_since_last_water,
        hours_since_last_meal,
        is_likely_thirst,
        estimated_calories_saved: if is_likely_thirst {
            THIRST_CALORIES_SAVED
        } else {
            0
        },
        recommendation,
        assessed_at: now,
    }
}
