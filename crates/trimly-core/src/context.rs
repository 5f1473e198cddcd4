//! Context Assembler
//!
//! Gathers everything the craving prompt needs from the journal:
//! - Survey profile summary and distance to the goal weight
//! - Meals from the last 7 days and meals so far today
//! - The 10 most recent satiety and energy ratings
//! - Current weight and time of day

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::journal::Journal;
use crate::models::{EnergyRecord, MealEntry, SatietyRecord, SurveyProfile, WeightEntry};

/// Days of meal history included in the prompt
const MEAL_HISTORY_DAYS: i64 = 7;
/// Ratings included per history
const RATING_HISTORY: usize = 10;

const EMPTY_LIST: &str = "none logged";

/// Assembled context for the craving prompt
#[derive(Debug, Clone, PartialEq)]
pub struct CravingContext {
    pub profile_summary: String,
    /// Empty when no survey was completed
    pub goal_delta: String,
    pub current_weight: Option<f64>,
    pub recent_meals: Vec<String>,
    pub satiety_history: Vec<String>,
    pub energy_history: Vec<String>,
    pub todays_meals: Vec<String>,
    pub current_time: String,
}

impl CravingContext {
    /// Convert context to template variables for prompt rendering
    ///
    /// Optional values map to empty strings so `{{#if}}` blocks drop out.
    pub fn to_template_vars(&self) -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();

        vars.insert("profile_summary", self.profile_summary.clone());
        vars.insert("goal_delta", self.goal_delta.clone());
        vars.insert(
            "current_weight",
            self.current_weight
                .map(|w| format!("{:.1}", w))
                .unwrap_or_default(),
        );
        vars.insert("recent_meals", bullet_list(&self.recent_meals));
        vars.insert("satiety_history", bullet_list(&self.satiety_history));
        vars.insert("energy_history", bullet_list(&self.energy_history));
        vars.insert("todays_meals", bullet_list(&self.todays_meals));
        vars.insert("current_time", self.current_time.clone());

        vars
    }
}

fn bullet_list(lines: &[String]) -> String {
    if lines.is_empty() {
        return EMPTY_LIST.to_string();
    }
    lines
        .iter()
        .map(|line| format!("- {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assembles context from the journal
pub struct ContextAssembler<'a> {
    journal: &'a Journal,
}

impl<'a> ContextAssembler<'a> {
    pub fn new(journal: &'a Journal) -> Self {
        Self { journal }
    }

    /// Assemble the craving context as of `now`
    pub fn for_craving_prediction(&self, now: NaiveDateTime) -> CravingContext {
        let profile = self.journal.load::<SurveyProfile>();
        let latest_weight = self
            .journal
            .repo::<WeightEntry>()
            .list_recent(1)
            .pop()
            .map(|w| w.weight);
        let current_weight = latest_weight.or(profile.as_ref().map(|p| p.current_weight));

        let meals = self.journal.repo::<MealEntry>().all();
        let history_start = now.date() - Duration::days(MEAL_HISTORY_DAYS - 1);

        let recent_meals = meals
            .iter()
            .filter(|m| m.timestamp.date() >= history_start && m.timestamp <= now)
            .map(|m| {
                format!(
                    "{} {}: {} ({} cal)",
                    m.timestamp.date(),
                    m.meal_type,
                    m.food_name,
                    m.calories
                )
            })
            .collect();

        let todays_meals = meals
            .iter()
            .filter(|m| m.timestamp.date() == now.date() && m.timestamp <= now)
            .map(|m| {
                format!(
                    "{} {}: {} ({} cal)",
                    m.timestamp.format("%H:%M"),
                    m.meal_type,
                    m.food_name,
                    m.calories
                )
            })
            .collect();

        let satiety_history = self
            .journal
            .repo::<SatietyRecord>()
            .list_recent(RATING_HISTORY)
            .iter()
            .map(|r| {
                format!(
                    "{}: {}/10, hungry again after {:.1} h",
                    r.food_name, r.rating, r.hours_until_hungry
                )
            })
            .collect();

        let energy_history = self
            .journal
            .repo::<EnergyRecord>()
            .list_recent(RATING_HISTORY)
            .iter()
            .map(|r| {
                format!(
                    "{}: {}/10, sustained {:.1} h, {}",
                    r.food_name,
                    r.rating,
                    r.hours_sustained,
                    if r.crash_experienced { "crash" } else { "no crash" }
                )
            })
            .collect();

        CravingContext {
            profile_summary: profile_summary(profile.as_ref()),
            goal_delta: profile
                .as_ref()
                .map(|p| goal_delta(p, current_weight.unwrap_or(p.current_weight)))
                .unwrap_or_default(),
            current_weight,
            recent_meals,
            satiety_history,
            energy_history,
            todays_meals,
            current_time: now.format("%A %H:%M").to_string(),
        }
    }
}

fn profile_summary(profile: Option<&SurveyProfile>) -> String {
    let Some(p) = profile else {
        return "No survey completed yet.".to_string();
    };

    let foods = p.distinct_problem_foods();
    let foods = if foods.is_empty() {
        "none".to_string()
    } else {
        foods.join(", ")
    };
    format!(
        "Motivation: {}. Biggest challenge: {}. Eating pattern: {}. Hunger: {}. Activity: {}. Timeline: {}. Problem foods: {}.",
        p.main_reason.as_str(),
        p.biggest_challenge.as_str(),
        p.eating_pattern.as_str(),
        p.satiety_level.as_str(),
        p.activity_level.as_str(),
        p.timeline.as_str(),
        foods
    )
}

fn goal_delta(profile: &SurveyProfile, current: f64) -> String {
    let remaining = current - profile.goal_weight;
    if remaining > 0.0 {
        format!(
            "{:.1} lbs to lose to reach {:.1} lbs",
            remaining, profile.goal_weight
        )
    } else {
        format!("at or below the goal weight of {:.1} lbs", profile.goal_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BiggestChallenge, EatingPattern};
    use crate::tracker::Tracker;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn meal(food: &str, meal_type: &str, timestamp: NaiveDateTime) -> MealEntry {
        MealEntry {
            meal_type: meal_type.to_string(),
            food_name: food.to_string(),
            calories: 400,
            timestamp,
        }
    }

    #[test]
    fn test_empty_journal() {
        let journal = Journal::in_memory();
        // 2026-03-10 is a Tuesday
        let ctx = ContextAssembler::new(&journal).for_craving_prediction(at(10, 15, 5));

        assert_eq!(ctx.goal_delta, "");
        assert_eq!(ctx.current_weight, None);
        assert_eq!(ctx.current_time, "Tuesday 15:05");

        let vars = ctx.to_template_vars();
        assert_eq!(vars["recent_meals"], EMPTY_LIST);
        assert_eq!(vars["current_weight"], "");
    }

    #[test]
    fn test_meal_windows() {
        let journal = Journal::in_memory();
        let tracker = Tracker::new(&journal);
        tracker.log_meal(meal("pizza", "dinner", at(3, 19, 0))).unwrap();
        tracker.log_meal(meal("salad", "lunch", at(4, 12, 0))).unwrap();
        tracker.log_meal(meal("oats", "breakfast", at(10, 8, 0))).unwrap();
        tracker.log_meal(meal("pasta", "dinner", at(10, 19, 0))).unwrap();

        let ctx = ContextAssembler::new(&journal).for_craving_prediction(at(10, 15, 0));
        assert_eq!(
            ctx.recent_meals,
            vec![
                "2026-03-04 lunch: salad (400 cal)",
                "2026-03-10 breakfast: oats (400 cal)"
            ]
        );
        assert_eq!(ctx.todays_meals, vec!["08:00 breakfast: oats (400 cal)"]);
    }

    #[test]
    fn test_profile_and_weight() {
        let journal = Journal::in_memory();
        let tracker = Tracker::new(&journal);
        tracker
            .save_survey(&SurveyProfile {
                eating_pattern: EatingPattern::NightEater,
                biggest_challenge: BiggestChallenge::Cravings,
                current_weight: 200.0,
                goal_weight: 180.0,
                problem_foods: vec!["chips".into()],
                ..Default::default()
            })
            .unwrap();

        let ctx = ContextAssembler::new(&journal).for_craving_prediction(at(10, 15, 0));
        assert_eq!(ctx.current_weight, Some(200.0));
        assert_eq!(ctx.goal_delta, "20.0 lbs to lose to reach 180.0 lbs");
        assert!(ctx.profile_summary.contains("night eater"));
        assert!(ctx.profile_summary.contains("Problem foods: chips"));

        tracker.log_weight(190.5, at(10, 7, 0)).unwrap();
        let ctx = ContextAssembler::new(&journal).for_craving_prediction(at(10, 15, 0));
        assert_eq!(ctx.current_weight, Some(190.5));
        assert_eq!(ctx.to_template_vars()["current_weight"], "190.5");
    }

    #[test]
    fn test_rating_histories_are_capped() {
        let journal = Journal::in_memory();
        for i in 0..15u8 {
            journal.repo::<SatietyRecord>().append(SatietyRecord {
                food_name: format!("food{}", i),
                rating: 5,
                hours_until_hungry: 2.0,
                meal_type: "snack".to_string(),
                timestamp: at(10, 8, 0),
            });
        }
        journal.repo::<EnergyRecord>().append(EnergyRecord {
            food_name: "coffee".to_string(),
            rating: 6,
            hours_sustained: 1.5,
            meal_type: "breakfast".to_string(),
            timestamp: at(10, 8, 0),
            crash_experienced: true,
        });

        let ctx = ContextAssembler::new(&journal).for_craving_prediction(at(10, 15, 0));
        assert_eq!(ctx.satiety_history.len(), RATING_HISTORY);
        assert!(ctx.satiety_history[0].starts_with("food14"));
        assert_eq!(ctx.energy_history, vec!["coffee: 6/10, sustained 1.5 h, crash"]);
    }
}
