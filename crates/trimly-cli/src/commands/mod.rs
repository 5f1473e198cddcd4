//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, open_journal, load_config, date parsing)
//! - `tracking` - Logging, goals, survey and delete commands
//! - `insights` - Streak, satiety, energy, thirst, patterns, motivation, predict
//! - `prompts` - Prompt listing, templates and rendered previews
//! - `ai` - AI backend test command
//! - `status` - Database status command

pub mod ai;
pub mod core;
pub mod insights;
pub mod prompts;
pub mod status;
pub mod tracking;

// Re-export command functions for main.rs
pub use ai::*;
pub use core::*;
pub use insights::*;
pub use prompts::*;
pub use status::*;
pub use tracking::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
