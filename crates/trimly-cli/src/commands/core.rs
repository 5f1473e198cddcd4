//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `open_journal` - Shared utilities to open the store
//! - `load_config` - Config file plus environment overrides
//! - Date and timestamp parsing for `--date` arguments
//! - `cmd_init` - Initialize the database

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use trimly_core::{Config, Database, Journal};

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    tracing::debug!(path = %path_str, encrypted = !no_encrypt, "Opening database");
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Journal over an opened database
pub fn open_journal(db: &Database) -> Journal {
    Journal::new(Arc::new(db.clone()))
}

/// Load the config file (explicit path or default location), then apply
/// environment overrides for the AI backend
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    config.ai = config.ai.with_env_overrides();
    tracing::debug!(backend = %config.ai.backend, host = ?config.ai.host, "Loaded config");
    Ok(config)
}

/// Parse `YYYY-MM-DD`, defaulting to today
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s)),
        None => Ok(Local::now().date_naive()),
    }
}

/// The current time of day on `date` (today if omitted)
pub fn parse_timestamp(date: Option<&str>) -> Result<NaiveDateTime> {
    let day = parse_date(date)?;
    Ok(day.and_time(Local::now().time()))
}

/// Ratings are whole numbers from 1 to 10
pub fn validate_rating(rating: u8) -> Result<u8> {
    if !(1..=10).contains(&rating) {
        bail!("Rating must be between 1 and 10 (got {})", rating);
    }
    Ok(rating)
}

pub fn validate_positive(value: f64, what: &str) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        bail!("{} must be a positive number (got {})", what, value);
    }
    Ok(value)
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let stats = db
        .collection_stats()
        .context("Failed to read collections")?;
    println!("   Collections stored: {}", stats.len());

    if db.is_encrypted().context("Failed to check encryption")? {
        println!("   🔒 Encryption: ENABLED");
    } else {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Fill in your profile: trimly survey set --current-weight 200 --goal-weight 175");
    println!("  2. Log a weigh-in: trimly log weight 199.5");
    println!("  3. Check your progress: trimly streak");

    Ok(())
}
