//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use trimly_core::models::{
    ActivityLogEntry, EatingPattern, MealEntry, SatietyRecord, SurveyProfile, WeightEntry,
};
use trimly_core::{
    BackendKind, Collection, Config, Journal, LogStore, MemoryStore, StreakTracker, Tracker,
};

use crate::cli::SurveyArgs;
use crate::commands::{self, truncate};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn at(d: u32, h: u32) -> NaiveDateTime {
    day(d).and_hms_opt(h, 0, 0).unwrap()
}

fn empty_survey_args() -> SurveyArgs {
    SurveyArgs {
        reason: None,
        challenge: None,
        eating: None,
        satiety: None,
        current_weight: None,
        goal_weight: None,
        timeline: None,
        activity: None,
        problem_foods: None,
    }
}

// ========== Log Command Tests ==========

#[test]
fn test_cmd_log_weight_records_activity() {
    let journal = Journal::in_memory();
    commands::cmd_log_weight(&journal, 190.0, at(4, 8)).unwrap();
    commands::cmd_log_weight(&journal, 189.2, at(5, 8)).unwrap();

    // weigh-ins are stored newest first
    let weights = journal.repo::<WeightEntry>().all();
    assert_eq!(weights.len(), 2);
    assert_eq!(weights[0].weight, 189.2);
    assert_eq!(weights[1].weight, 190.0);
    assert_eq!(Tracker::new(&journal).latest_weight().unwrap().weight, 189.2);

    let activities = journal.repo::<ActivityLogEntry>().all();
    assert_eq!(activities.len(), 2);
}

#[test]
fn test_cmd_log_weight_succeeds_with_unreadable_activity_log() {
    let store = Arc::new(MemoryStore::new());
    store.write(Collection::ActivityLog, "{corrupt").unwrap();
    let journal = Journal::new(store);

    commands::cmd_log_weight(&journal, 180.0, at(4, 8)).unwrap();
    commands::cmd_log_win(&journal, "Packed lunch", day(4)).unwrap();

    assert_eq!(journal.repo::<WeightEntry>().count(), 1);
    assert_eq!(Tracker::new(&journal).recent_wins(5).len(), 1);
}

#[test]
fn test_cmd_log_weight_rejects_non_positive() {
    let journal = Journal::in_memory();
    assert!(commands::cmd_log_weight(&journal, -5.0, at(4, 8)).is_err());
    assert!(commands::cmd_log_weight(&journal, 0.0, at(4, 8)).is_err());
    assert!(commands::cmd_log_weight(&journal, f64::NAN, at(4, 8)).is_err());
    assert_eq!(journal.repo::<WeightEntry>().count(), 0);
}

#[test]
fn test_cmd_log_meal_normalizes_type() {
    let journal = Journal::in_memory();
    commands::cmd_log_meal(&journal, "  Oatmeal ", " Breakfast", 300, at(4, 8)).unwrap();

    let meals = journal.repo::<MealEntry>().all();
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0].food_name, "Oatmeal");
    assert_eq!(meals[0].meal_type, "breakfast");
}

#[test]
fn test_cmd_log_meal_requires_food() {
    let journal = Journal::in_memory();
    assert!(commands::cmd_log_meal(&journal, "   ", "lunch", 100, at(4, 12)).is_err());
}

#[test]
fn test_cmd_log_water_accumulates_per_day() {
    let journal = Journal::in_memory();
    commands::cmd_log_water(&journal, 2, at(4, 9)).unwrap();
    commands::cmd_log_water(&journal, 1, at(4, 11)).unwrap();
    assert_eq!(Tracker::new(&journal).water_on(day(4)).cups_today, 3);

    commands::cmd_log_water(&journal, 1, at(5, 9)).unwrap();
    assert_eq!(Tracker::new(&journal).water_on(day(5)).cups_today, 1);
}

#[test]
fn test_cmd_log_water_large_counts_saturate() {
    let journal = Journal::in_memory();
    commands::cmd_log_water(&journal, u32::MAX, at(4, 9)).unwrap();
    commands::cmd_log_water(&journal, u32::MAX, at(4, 10)).unwrap();
    assert_eq!(Tracker::new(&journal).water_on(day(4)).cups_today, u32::MAX);
}

#[test]
fn test_cmd_log_water_rejects_zero() {
    let journal = Journal::in_memory();
    assert!(commands::cmd_log_water(&journal, 0, at(4, 9)).is_err());
}

#[test]
fn test_cmd_log_satiety_validates_rating() {
    let journal = Journal::in_memory();
    assert!(commands::cmd_log_satiety(&journal, "eggs", 0, 3.0, "breakfast", at(4, 8)).is_err());
    assert!(commands::cmd_log_satiety(&journal, "eggs", 11, 3.0, "breakfast", at(4, 8)).is_err());
    assert!(commands::cmd_log_satiety(&journal, "eggs", 8, -1.0, "breakfast", at(4, 8)).is_err());

    commands::cmd_log_satiety(&journal, "eggs", 8, 4.5, "Breakfast", at(4, 8)).unwrap();
    let records = journal.repo::<SatietyRecord>().all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].rating, 8);
    assert_eq!(records[0].meal_type, "breakfast");
}

#[test]
fn test_cmd_log_energy_validates_rating() {
    let journal = Journal::in_memory();
    assert!(
        commands::cmd_log_energy(&journal, "donut", 11, 1.0, "snack", true, at(4, 15)).is_err()
    );
    commands::cmd_log_energy(&journal, "donut", 3, 1.0, "snack", true, at(4, 15)).unwrap();
    commands::cmd_energy(&journal).unwrap();
}

#[test]
fn test_cmd_log_win_requires_text() {
    let journal = Journal::in_memory();
    assert!(commands::cmd_log_win(&journal, "  ", day(4)).is_err());

    commands::cmd_log_win(&journal, "Skipped dessert", day(4)).unwrap();
    assert_eq!(Tracker::new(&journal).recent_wins(5).len(), 1);
    assert_eq!(StreakTracker::new(&journal).current_streak_on(day(4)), 1);
}

#[test]
fn test_cmd_log_activity() {
    let journal = Journal::in_memory();
    commands::cmd_log_activity(&journal, "restaurant", day(4), Some(r#"{"place":"diner"}"#))
        .unwrap();
    // Same type and day is a no-op
    commands::cmd_log_activity(&journal, "Restaurant", day(4), None).unwrap();
    assert_eq!(journal.repo::<ActivityLogEntry>().count(), 1);

    assert!(commands::cmd_log_activity(&journal, "jogging", day(4), None).is_err());
    assert!(commands::cmd_log_activity(&journal, "swap", day(4), Some("{not json")).is_err());
    assert_eq!(journal.repo::<ActivityLogEntry>().count(), 1);
}

// ========== Goals Command Tests ==========

#[test]
fn test_cmd_goals_set_and_complete() {
    let journal = Journal::in_memory();
    let goals = vec![
        "Walk 20 minutes".to_string(),
        " ".to_string(),
        "No soda".to_string(),
    ];
    commands::cmd_goals_set(&journal, day(4), &goals).unwrap();

    let record = Tracker::new(&journal).goals_on(day(4)).unwrap();
    assert_eq!(record.goals.len(), 2);

    commands::cmd_goals_complete(&journal, day(4), 2).unwrap();
    let record = Tracker::new(&journal).goals_on(day(4)).unwrap();
    assert!(!record.goals[0].completed);
    assert!(record.goals[1].completed);

    commands::cmd_goals_list(&journal, day(4)).unwrap();
    commands::cmd_goals_list(&journal, day(5)).unwrap();
}

#[test]
fn test_cmd_goals_invalid_input() {
    let journal = Journal::in_memory();
    assert!(commands::cmd_goals_set(&journal, day(4), &[]).is_err());

    commands::cmd_goals_set(&journal, day(4), &["Stretch".to_string()]).unwrap();
    assert!(commands::cmd_goals_complete(&journal, day(4), 0).is_err());
    assert!(commands::cmd_goals_complete(&journal, day(4), 2).is_err());
    assert!(commands::cmd_goals_complete(&journal, day(5), 1).is_err());
}

// ========== Survey Command Tests ==========

#[test]
fn test_apply_survey_args_parses_values() {
    let args = SurveyArgs {
        eating: Some("night_eater".to_string()),
        current_weight: Some(200.0),
        goal_weight: Some(175.0),
        problem_foods: Some("chips, ice cream,,".to_string()),
        ..empty_survey_args()
    };

    let profile = commands::apply_survey_args(SurveyProfile::default(), &args).unwrap();
    assert_eq!(profile.eating_pattern, EatingPattern::NightEater);
    assert_eq!(profile.current_weight, 200.0);
    assert_eq!(profile.problem_foods, vec!["chips", "ice cream"]);
}

#[test]
fn test_apply_survey_args_requires_weights() {
    let args = SurveyArgs {
        eating: Some("grazer".to_string()),
        ..empty_survey_args()
    };
    assert!(commands::apply_survey_args(SurveyProfile::default(), &args).is_err());

    // An existing profile already carries weights
    let existing = SurveyProfile {
        current_weight: 180.0,
        goal_weight: 160.0,
        ..SurveyProfile::default()
    };
    let profile = commands::apply_survey_args(existing, &args).unwrap();
    assert_eq!(profile.eating_pattern, EatingPattern::Grazer);
    assert_eq!(profile.goal_weight, 160.0);
}

#[test]
fn test_apply_survey_args_rejects_unknown_value() {
    let args = SurveyArgs {
        reason: Some("fame".to_string()),
        current_weight: Some(200.0),
        goal_weight: Some(175.0),
        ..empty_survey_args()
    };
    assert!(commands::apply_survey_args(SurveyProfile::default(), &args).is_err());
}

#[test]
fn test_cmd_survey_set_and_show() {
    let journal = Journal::in_memory();
    commands::cmd_survey_show(&journal, false).unwrap();

    let args = SurveyArgs {
        current_weight: Some(210.0),
        goal_weight: Some(180.0),
        ..empty_survey_args()
    };
    commands::cmd_survey_set(&journal, &args).unwrap();

    let saved = Tracker::new(&journal).survey().unwrap();
    assert_eq!(saved.current_weight, 210.0);
    commands::cmd_survey_show(&journal, true).unwrap();
}

// ========== Delete Command Tests ==========

#[test]
fn test_cmd_delete_weight_and_meal() {
    let journal = Journal::in_memory();
    commands::cmd_log_weight(&journal, 190.0, at(4, 8)).unwrap();
    commands::cmd_log_weight(&journal, 189.0, at(5, 8)).unwrap();
    commands::cmd_log_meal(&journal, "Salad", "lunch", 350, at(4, 12)).unwrap();

    commands::cmd_delete_weight(&journal, day(4)).unwrap();
    commands::cmd_delete_meal(&journal, "salad", day(4)).unwrap();
    commands::cmd_delete_meal(&journal, "pizza", day(4)).unwrap();

    let weights = journal.repo::<WeightEntry>().all();
    assert_eq!(weights.len(), 1);
    assert_eq!(weights[0].date, day(5));
    assert_eq!(journal.repo::<MealEntry>().count(), 0);
}

// ========== Insight Command Tests ==========

#[test]
fn test_insight_commands_on_empty_journal() {
    let journal = Journal::in_memory();
    let config = Config::default();

    commands::cmd_streak(&journal, &config, day(4)).unwrap();
    commands::cmd_satiety(&journal).unwrap();
    commands::cmd_energy(&journal).unwrap();
    commands::cmd_thirst(&journal, at(4, 15)).unwrap();
    commands::cmd_patterns(&journal, day(4)).unwrap();
    commands::cmd_motivation(&journal).unwrap();
    commands::print_counts(&journal);
}

#[test]
fn test_insight_commands_with_data() {
    let journal = Journal::in_memory();
    let config = Config::default();

    let args = SurveyArgs {
        eating: Some("night eater".to_string()),
        challenge: Some("cravings".to_string()),
        current_weight: Some(200.0),
        goal_weight: Some(180.0),
        ..empty_survey_args()
    };
    commands::cmd_survey_set(&journal, &args).unwrap();
    for (d, w) in [(1, 200.0), (2, 199.0), (3, 198.0), (4, 197.0)] {
        commands::cmd_log_weight(&journal, w, at(d, 7)).unwrap();
    }
    commands::cmd_log_satiety(&journal, "eggs", 9, 5.0, "breakfast", at(4, 8)).unwrap();
    commands::cmd_log_meal(&journal, "eggs", "breakfast", 300, at(4, 8)).unwrap();

    commands::cmd_streak(&journal, &config, day(4)).unwrap();
    commands::cmd_satiety(&journal).unwrap();
    commands::cmd_thirst(&journal, at(4, 15)).unwrap();
    commands::cmd_patterns(&journal, day(4)).unwrap();
    commands::cmd_motivation(&journal).unwrap();

    assert_eq!(StreakTracker::new(&journal).current_streak_on(day(4)), 4);
}

#[tokio::test]
async fn test_cmd_predict_without_backend_falls_back() {
    let journal = Journal::in_memory();
    let config = Config::default();
    assert!(config.ai.host.is_none());

    commands::cmd_predict(&journal, &config, at(4, 15), false)
        .await
        .unwrap();
    commands::cmd_predict(&journal, &config, at(4, 15), true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cmd_predict_with_mock_backend() {
    let journal = Journal::in_memory();
    commands::cmd_log_meal(&journal, "toast", "breakfast", 250, at(4, 8)).unwrap();

    let mut config = Config::default();
    config.ai.backend = BackendKind::Mock;
    commands::cmd_predict(&journal, &config, at(4, 15), true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cmd_ai_test_with_mock_backend() {
    let mut config = Config::default();
    config.ai.backend = BackendKind::Mock;
    commands::cmd_ai_test(&config).await.unwrap();
}

#[tokio::test]
async fn test_cmd_ai_test_without_host() {
    let config = Config::default();
    commands::cmd_ai_test(&config).await.unwrap();
}

// ========== Prompt Command Tests ==========

#[test]
fn test_cmd_prompts_list() {
    assert!(commands::cmd_prompts_list().is_ok());
}

#[test]
fn test_cmd_prompts_show() {
    assert!(commands::cmd_prompts_show("predict_craving").is_ok());
}

#[test]
fn test_cmd_prompts_unknown_id() {
    let journal = Journal::in_memory();
    let err = commands::cmd_prompts_show("no_such_prompt").unwrap_err();
    assert!(err.to_string().contains("predict_craving"));
    assert!(commands::cmd_prompts_render(&journal, "no_such_prompt", at(4, 15)).is_err());
}

#[test]
fn test_cmd_prompts_render_uses_journal() {
    let journal = Journal::in_memory();
    commands::cmd_log_meal(&journal, "toast", "breakfast", 250, at(4, 8)).unwrap();
    assert!(commands::cmd_prompts_render(&journal, "predict_craving", at(4, 15)).is_ok());
}

// ========== Utility Tests ==========

#[test]
fn test_parse_date() {
    assert_eq!(
        commands::parse_date(Some("2024-03-04")).unwrap(),
        day(4)
    );
    assert_eq!(
        commands::parse_date(Some(" 2024-03-04 ")).unwrap(),
        day(4)
    );
    assert!(commands::parse_date(Some("03/04/2024")).is_err());
    assert!(commands::parse_date(None).is_ok());
}

#[test]
fn test_parse_timestamp_keeps_day() {
    let ts = commands::parse_timestamp(Some("2024-03-04")).unwrap();
    assert_eq!(ts.date(), day(4));
}

#[test]
fn test_validate_rating() {
    assert!(commands::validate_rating(0).is_err());
    assert_eq!(commands::validate_rating(1).unwrap(), 1);
    assert_eq!(commands::validate_rating(10).unwrap(), 10);
    assert!(commands::validate_rating(11).is_err());
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello world", 8), "hello...");
    assert_eq!(truncate("crème brûlée", 8), "crème...");
}

#[test]
fn test_cmd_init_and_status() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trimly.db");
    commands::cmd_init(&path, true).unwrap();
    assert!(path.exists());

    let config = Config::default();
    commands::cmd_status(&path, &config, true).unwrap();
}
