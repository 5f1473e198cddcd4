//! Trimly CLI - Habit tracking with behavioral insights
//!
//! Usage:
//!   trimly init                      Initialize database
//!   trimly survey set ...            Fill in the profile survey
//!   trimly log weight 182.4          Log a weigh-in
//!   trimly streak                    Show streak and weekly progress
//!   trimly predict                   Predict craving risk

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Status => commands::cmd_status(&cli.db, &config, cli.no_encrypt),
        Commands::Log { entry } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let journal = commands::open_journal(&db);
            match entry {
                LogEntry::Weight { weight, date } => {
                    let at = commands::parse_timestamp(date.as_deref())?;
                    commands::cmd_log_weight(&journal, weight, at)
                }
                LogEntry::Meal {
                    food,
                    meal_type,
                    calories,
                    date,
                } => {
                    let at = commands::parse_timestamp(date.as_deref())?;
                    commands::cmd_log_meal(&journal, &food, &meal_type, calories, at)
                }
                LogEntry::Water { cups } => {
                    commands::cmd_log_water(&journal, cups, Local::now().naive_local())
                }
                LogEntry::Satiety {
                    food,
                    rating,
                    hours,
                    meal_type,
                } => commands::cmd_log_satiety(
                    &journal,
                    &food,
                    rating,
                    hours,
                    &meal_type,
                    Local::now().naive_local(),
                ),
                LogEntry::Energy {
                    food,
                    rating,
                    hours,
                    meal_type,
                    crash,
                } => commands::cmd_log_energy(
                    &journal,
                    &food,
                    rating,
                    hours,
                    &meal_type,
                    crash,
                    Local::now().naive_local(),
                ),
                LogEntry::Win { text, date } => {
                    let date = commands::parse_date(date.as_deref())?;
                    commands::cmd_log_win(&journal, &text, date)
                }
                LogEntry::Activity {
                    activity_type,
                    date,
                    payload,
                } => {
                    let date = commands::parse_date(date.as_deref())?;
                    commands::cmd_log_activity(&journal, &activity_type, date, payload.as_deref())
                }
            }
        }
        Commands::Goals { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let journal = commands::open_journal(&db);
            match action {
                GoalsAction::List { date } => {
                    commands::cmd_goals_list(&journal, commands::parse_date(date.as_deref())?)
                }
                GoalsAction::Set { goals, date } => commands::cmd_goals_set(
                    &journal,
                    commands::parse_date(date.as_deref())?,
                    &goals,
                ),
                GoalsAction::Complete { number, date } => commands::cmd_goals_complete(
                    &journal,
                    commands::parse_date(date.as_deref())?,
                    number,
                ),
            }
        }
        Commands::Survey { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let journal = commands::open_journal(&db);
            match action {
                SurveyAction::Set(args) => commands::cmd_survey_set(&journal, &args),
                SurveyAction::Show { json } => commands::cmd_survey_show(&journal, json),
            }
        }
        Commands::Delete { target } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let journal = commands::open_journal(&db);
            match target {
                DeleteTarget::Weight { date } => {
                    commands::cmd_delete_weight(&journal, commands::parse_date(Some(&date))?)
                }
                DeleteTarget::Meal { food, date } => commands::cmd_delete_meal(
                    &journal,
                    &food,
                    commands::parse_date(Some(&date))?,
                ),
            }
        }
        Commands::Streak => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let journal = commands::open_journal(&db);
            commands::cmd_streak(&journal, &config, Local::now().date_naive())
        }
        Commands::Satiety => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_satiety(&commands::open_journal(&db))
        }
        Commands::Energy => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_energy(&commands::open_journal(&db))
        }
        Commands::Thirst => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_thirst(&commands::open_journal(&db), Local::now().naive_local())
        }
        Commands::Patterns => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_patterns(&commands::open_journal(&db), Local::now().date_naive())
        }
        Commands::Motivation => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_motivation(&commands::open_journal(&db))
        }
        Commands::Predict { json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let journal = commands::open_journal(&db);
            commands::cmd_predict(&journal, &config, Local::now().naive_local(), json).await
        }
        Commands::Prompts { action } => match action {
            PromptsAction::List => commands::cmd_prompts_list(),
            PromptsAction::Show { id, render: false } => commands::cmd_prompts_show(&id),
            PromptsAction::Show { id, render: true } => {
                let db = commands::open_db(&cli.db, cli.no_encrypt)?;
                commands::cmd_prompts_render(
                    &commands::open_journal(&db),
                    &id,
                    Local::now().naive_local(),
                )
            }
        },
        Commands::Ai { action } => match action {
            AiAction::Test => commands::cmd_ai_test(&config).await,
        },
    }
}
