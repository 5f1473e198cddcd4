//! Tracking command implementations (log, goals, survey, delete)

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use trimly_core::models::{
    parse_survey_value, ActivityLevel, ActivityType, BiggestChallenge, EatingPattern, EnergyRecord,
    MainReason, MealEntry, SatietyLevel, SatietyRecord, SurveyProfile, Timeline,
};
use trimly_core::{Journal, SatietyEnergyAnalyzer, StreakTracker, Tracker};

use super::{validate_positive, validate_rating};
use crate::cli::SurveyArgs;

pub fn cmd_log_weight(journal: &Journal, weight: f64, at: NaiveDateTime) -> Result<()> {
    let weight = validate_positive(weight, "Weight")?;
    let tracker = Tracker::new(journal);
    let previous = tracker.latest_weight();

    tracker
        .log_weight(weight, at)
        .context("Failed to save weigh-in")?;

    println!("⚖️  Logged {:.1} lbs on {}", weight, at.date());
    if let Some(previous) = previous {
        let change = weight - previous.weight;
        if change < 0.0 {
            println!("   📉 Down {:.1} lbs since {}", -change, previous.date);
        } else if change > 0.0 {
            println!("   📈 Up {:.1} lbs since {}", change, previous.date);
        } else {
            println!("   ➡️  Same as {}", previous.date);
        }
    }
    Ok(())
}

pub fn cmd_log_meal(
    journal: &Journal,
    food: &str,
    meal_type: &str,
    calories: u32,
    at: NaiveDateTime,
) -> Result<()> {
    let food = food.trim();
    if food.is_empty() {
        bail!("Food name is required");
    }

    Tracker::new(journal)
        .log_meal(MealEntry {
            meal_type: meal_type.trim().to_lowercase(),
            food_name: food.to_string(),
            calories,
            timestamp: at,
        })
        .context("Failed to save meal")?;

    println!("🍽️  Logged {} ({}, {} cal)", food, meal_type, calories);
    Ok(())
}

pub fn cmd_log_water(journal: &Journal, cups: u32, now: NaiveDateTime) -> Result<()> {
    if cups == 0 {
        bail!("Cups must be at least 1");
    }

    let log = Tracker::new(journal)
        .log_water(cups, now)
        .context("Failed to save water")?;

    println!(
        "💧 Logged {} cup{}. Today: {} cups",
        cups,
        if cups == 1 { "" } else { "s" },
        log.cups_today
    );
    Ok(())
}

pub fn cmd_log_satiety(
    journal: &Journal,
    food: &str,
    rating: u8,
    hours: f64,
    meal_type: &str,
    at: NaiveDateTime,
) -> Result<()> {
    let rating = validate_rating(rating)?;
    let hours = validate_positive(hours, "Hours until hungry")?;

    SatietyEnergyAnalyzer::new(journal)
        .try_save_satiety(SatietyRecord {
            food_name: food.trim().to_string(),
            rating,
            hours_until_hungry: hours,
            meal_type: meal_type.trim().to_lowercase(),
            timestamp: at,
        })
        .context("Failed to save satiety rating")?;

    println!(
        "🥗 Rated {}: {}/10, hungry again after {:.1} h",
        food.trim(),
        rating,
        hours
    );
    Ok(())
}

pub fn cmd_log_energy(
    journal: &Journal,
    food: &str,
    rating: u8,
    hours: f64,
    meal_type: &str,
    crash: bool,
    at: NaiveDateTime,
) -> Result<()> {
    let rating = validate_rating(rating)?;
    let hours = validate_positive(hours, "Hours sustained")?;

    SatietyEnergyAnalyzer::new(journal)
        .try_save_energy(EnergyRecord {
            food_name: food.trim().to_string(),
            rating,
            hours_sustained: hours,
            meal_type: meal_type.trim().to_lowercase(),
            timestamp: at,
            crash_experienced: crash,
        })
        .context("Failed to save energy rating")?;

    println!(
        "⚡ Rated {}: {}/10, {:.1} h sustained{}",
        food.trim(),
        rating,
        hours,
        if crash { ", crashed" } else { "" }
    );
    Ok(())
}

pub fn cmd_log_win(journal: &Journal, text: &str, date: NaiveDate) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        bail!("Win text is required");
    }

    Tracker::new(journal)
        .log_win(text, date)
        .context("Failed to save win")?;

    println!("🏆 Win recorded for {}: {}", date, text);
    Ok(())
}

pub fn cmd_log_activity(
    journal: &Journal,
    activity_type: &str,
    date: NaiveDate,
    payload: Option<&str>,
) -> Result<()> {
    let activity_type: ActivityType = activity_type
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let payload = match payload {
        Some(raw) => serde_json::from_str(raw).context("Payload must be valid JSON")?,
        None => serde_json::Value::Null,
    };

    let added = StreakTracker::new(journal)
        .try_log_activity(activity_type, date, payload)
        .context("Failed to save activity")?;

    if added {
        println!("✅ Logged {} activity for {}", activity_type, date);
    } else {
        println!("   Already logged {} for {}", activity_type, date);
    }
    Ok(())
}

pub fn cmd_goals_list(journal: &Journal, date: NaiveDate) -> Result<()> {
    let Some(record) = Tracker::new(journal).goals_on(date) else {
        println!("No goals set for {}.", date);
        println!("   Set some with: trimly goals set \"Walk 20 minutes\" \"No soda\"");
        return Ok(());
    };

    println!();
    println!("🎯 Goals for {} ({}/{})", date, record.completed(), record.goals.len());
    println!("   ─────────────────────────────");
    for (i, goal) in record.goals.iter().enumerate() {
        let mark = if goal.completed { "✅" } else { "⬜" };
        println!("   {} {}. {}", mark, i + 1, goal.title);
    }
    println!();
    Ok(())
}

pub fn cmd_goals_set(journal: &Journal, date: NaiveDate, goals: &[String]) -> Result<()> {
    let goals: Vec<String> = goals
        .iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();
    if goals.is_empty() {
        bail!("At least one goal is required");
    }

    Tracker::new(journal)
        .set_goals(date, &goals)
        .context("Failed to save goals")?;

    println!("🎯 Set {} goal(s) for {}", goals.len(), date);
    Ok(())
}

pub fn cmd_goals_complete(journal: &Journal, date: NaiveDate, number: usize) -> Result<()> {
    if number == 0 {
        bail!("Goal numbers start at 1");
    }

    let goal = Tracker::new(journal)
        .complete_goal(date, number - 1)
        .with_context(|| format!("Could not complete goal #{} for {}", number, date))?;

    println!("✅ Completed: {}", goal.title);
    Ok(())
}

fn survey_value<T: Copy>(
    value: Option<&str>,
    all: &[T],
    as_str: fn(&T) -> &'static str,
) -> Result<Option<T>> {
    value
        .map(|v| parse_survey_value(v, all, as_str).map_err(|e| anyhow::anyhow!(e)))
        .transpose()
}

/// Apply the given answers on top of `profile`
pub fn apply_survey_args(mut profile: SurveyProfile, args: &SurveyArgs) -> Result<SurveyProfile> {
    if let Some(v) = survey_value(args.reason.as_deref(), MainReason::all(), MainReason::as_str)? {
        profile.main_reason = v;
    }
    if let Some(v) = survey_value(
        args.challenge.as_deref(),
        BiggestChallenge::all(),
        BiggestChallenge::as_str,
    )? {
        profile.biggest_challenge = v;
    }
    if let Some(v) = survey_value(
        args.eating.as_deref(),
        EatingPattern::all(),
        EatingPattern::as_str,
    )? {
        profile.eating_pattern = v;
    }
    if let Some(v) = survey_value(
        args.satiety.as_deref(),
        SatietyLevel::all(),
        SatietyLevel::as_str,
    )? {
        profile.satiety_level = v;
    }
    if let Some(v) = survey_value(args.timeline.as_deref(), Timeline::all(), Timeline::as_str)? {
        profile.timeline = v;
    }
    if let Some(v) = survey_value(
        args.activity.as_deref(),
        ActivityLevel::all(),
        ActivityLevel::as_str,
    )? {
        profile.activity_level = v;
    }
    if let Some(w) = args.current_weight {
        profile.current_weight = validate_positive(w, "Current weight")?;
    }
    if let Some(w) = args.goal_weight {
        profile.goal_weight = validate_positive(w, "Goal weight")?;
    }
    if let Some(foods) = &args.problem_foods {
        profile.problem_foods = foods
            .split(',')
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
    }

    if profile.current_weight <= 0.0 || profile.goal_weight <= 0.0 {
        bail!("Both --current-weight and --goal-weight are required the first time");
    }
    Ok(profile)
}

pub fn cmd_survey_set(journal: &Journal, args: &SurveyArgs) -> Result<()> {
    let tracker = Tracker::new(journal);
    let profile = apply_survey_args(tracker.survey().unwrap_or_default(), args)?;

    tracker
        .save_survey(&profile)
        .context("Failed to save survey")?;

    println!("📝 Survey saved");
    print_survey(&profile);
    Ok(())
}

pub fn cmd_survey_show(journal: &Journal, json: bool) -> Result<()> {
    let Some(profile) = Tracker::new(journal).survey() else {
        println!("No survey saved yet. Run: trimly survey set --current-weight 200 --goal-weight 175");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        print_survey(&profile);
    }
    Ok(())
}

fn print_survey(profile: &SurveyProfile) {
    println!("   ─────────────────────────────");
    println!("   Main reason:       {}", profile.main_reason.as_str());
    println!("   Biggest challenge: {}", profile.biggest_challenge.as_str());
    println!("   Eating pattern:    {}", profile.eating_pattern.as_str());
    println!("   Hunger:            {}", profile.satiety_level.as_str());
    println!("   Activity:          {}", profile.activity_level.as_str());
    println!("   Timeline:          {}", profile.timeline.as_str());
    println!(
        "   Weight:            {:.1} → {:.1} lbs",
        profile.current_weight, profile.goal_weight
    );
    let foods = profile.distinct_problem_foods();
    if !foods.is_empty() {
        println!("   Problem foods:     {}", foods.join(", "));
    }
}

pub fn cmd_delete_weight(journal: &Journal, date: NaiveDate) -> Result<()> {
    let removed = Tracker::new(journal)
        .delete_weights_on(date)
        .context("Failed to delete weigh-ins")?;

    if removed == 0 {
        println!("No weigh-ins found on {}", date);
    } else {
        println!("🗑️  Deleted {} weigh-in(s) from {}", removed, date);
    }
    Ok(())
}

pub fn cmd_delete_meal(journal: &Journal, food: &str, date: NaiveDate) -> Result<()> {
    let removed = Tracker::new(journal)
        .delete_meals(food.trim(), date)
        .context("Failed to delete meals")?;

    if removed == 0 {
        println!("No meals named '{}' found on {}", food.trim(), date);
    } else {
        println!("🗑️  Deleted {} meal(s) named '{}' from {}", removed, food.trim(), date);
    }
    Ok(())
}
