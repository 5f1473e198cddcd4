//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Trimly - Habit tracking with behavioral insights
#[derive(Parser)]
#[command(name = "trimly")]
#[command(about = "Local-first weight and habit tracker with behavioral insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "trimly.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for real data)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set TRIMLY_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show database status and record counts
    Status,

    /// Log a weigh-in, meal, water, rating, win or activity
    Log {
        #[command(subcommand)]
        entry: LogEntry,
    },

    /// Manage daily goals
    Goals {
        #[command(subcommand)]
        action: GoalsAction,
    },

    /// Fill in or show the profile survey
    Survey {
        #[command(subcommand)]
        action: SurveyAction,
    },

    /// Delete logged entries
    Delete {
        #[command(subcommand)]
        target: DeleteTarget,
    },

    /// Show the current streak, weekly progress and badges
    Streak,

    /// Rank foods by how full they keep you
    Satiety,

    /// Rank foods by the energy they give you
    Energy,

    /// Check whether a hunger signal is likely thirst
    Thirst,

    /// Diagnose behavior patterns from the survey and progress
    Patterns,

    /// Show motivational insights
    Motivation,

    /// Predict craving risk for the next few hours
    Predict {
        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage AI prompts
    Prompts {
        #[command(subcommand)]
        action: PromptsAction,
    },

    /// AI backend commands
    Ai {
        #[command(subcommand)]
        action: AiAction,
    },
}

#[derive(Subcommand)]
pub enum LogEntry {
    /// Log a weigh-in (lbs)
    Weight {
        weight: f64,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Log a meal
    Meal {
        /// Food name
        food: String,

        /// Meal type: breakfast, lunch, dinner, snack
        #[arg(short = 't', long, default_value = "snack")]
        meal_type: String,

        /// Calories
        #[arg(short, long, default_value = "0")]
        calories: u32,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Log cups of water
    Water {
        #[arg(default_value = "1")]
        cups: u32,
    },

    /// Rate how full a food kept you
    Satiety {
        /// Food name
        food: String,

        /// Fullness rating 1-10
        #[arg(short, long)]
        rating: u8,

        /// Hours until hungry again
        #[arg(long)]
        hours: f64,

        /// Meal type: breakfast, lunch, dinner, snack
        #[arg(short = 't', long, default_value = "snack")]
        meal_type: String,
    },

    /// Rate the energy a food gave you
    Energy {
        /// Food name
        food: String,

        /// Energy rating 1-10
        #[arg(short, long)]
        rating: u8,

        /// Hours of sustained energy
        #[arg(long)]
        hours: f64,

        /// Meal type: breakfast, lunch, dinner, snack
        #[arg(short = 't', long, default_value = "snack")]
        meal_type: String,

        /// An energy crash followed
        #[arg(long)]
        crash: bool,
    },

    /// Record a daily win
    Win {
        text: String,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Record an activity toward the streak
    Activity {
        /// Activity type: weight, goal, win, restaurant, swap
        activity_type: String,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,

        /// JSON payload to attach
        #[arg(long)]
        payload: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// Show goals for a day
    List {
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Replace the goals for a day
    Set {
        /// Goal titles
        #[arg(required = true)]
        goals: Vec<String>,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Mark a goal as completed (1-based, as shown by `goals list`)
    Complete {
        number: usize,

        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SurveyAction {
    /// Set survey answers (unspecified answers are kept)
    Set(SurveyArgs),

    /// Show the saved survey
    Show {
        /// Print the survey as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
pub struct SurveyArgs {
    /// Main reason: health, appearance, energy, confidence, doctor_recommended
    #[arg(long)]
    pub reason: Option<String>,

    /// Biggest challenge: emotional_eating, cravings, portion_control, staying_consistent, lack_of_time
    #[arg(long)]
    pub challenge: Option<String>,

    /// Eating pattern: night_eater, skip_meals, grazer, weekend_overeater, regular_meals
    #[arg(long)]
    pub eating: Option<String>,

    /// Hunger: always_hungry, hungry_soon_after_eating, normal, rarely_hungry
    #[arg(long)]
    pub satiety: Option<String>,

    /// Starting weight (lbs)
    #[arg(long)]
    pub current_weight: Option<f64>,

    /// Goal weight (lbs)
    #[arg(long)]
    pub goal_weight: Option<f64>,

    /// Timeline: 1_month, 3_months, 6_months, 1_year, no_rush
    #[arg(long)]
    pub timeline: Option<String>,

    /// Activity level: sedentary, lightly_active, moderately_active, very_active
    #[arg(long)]
    pub activity: Option<String>,

    /// Problem foods, comma-separated
    #[arg(long)]
    pub problem_foods: Option<String>,
}

#[derive(Subcommand)]
pub enum DeleteTarget {
    /// Delete weigh-ins recorded on a day
    Weight {
        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// Delete meals with a name on a day
    Meal {
        /// Food name (case-insensitive)
        food: String,

        /// Date (YYYY-MM-DD)
        date: String,
    },
}

#[derive(Subcommand)]
pub enum PromptsAction {
    /// List prompts and the override directory
    List,

    /// Show a prompt template
    Show {
        /// Prompt ID (e.g., predict_craving)
        id: String,

        /// Fill the template from the current journal, as `predict` would send it
        #[arg(long)]
        render: bool,
    },
}

#[derive(Subcommand)]
pub enum AiAction {
    /// Test the configured backend with a sample prompt
    Test,
}
