//! Prompt command implementations

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use trimly_core::prompts::{default_prompts_dir, PromptId, PromptLibrary};
use trimly_core::{CravingPredictor, Journal};

fn parse_prompt_id(raw: &str) -> Result<PromptId> {
    raw.parse().map_err(|_| {
        let known: Vec<&str> = PromptId::all().iter().map(|id| id.as_str()).collect();
        anyhow!(
            "Unknown prompt '{}'. Available: {}",
            raw,
            known.join(", ")
        )
    })
}

/// List prompts, where each one is loaded from and the override directory
pub fn cmd_prompts_list() -> Result<()> {
    let mut library = PromptLibrary::new();

    println!();
    println!("📝 Prompts");
    println!("   ─────────────────────────────");
    for info in library.list() {
        let source = match &info.override_path {
            Some(path) => format!("override at {}", path.display()),
            None => "embedded".to_string(),
        };
        println!(
            "   {}  v{}  ({})  {}",
            info.id, info.version, info.task_type, source
        );
    }

    println!();
    match default_prompts_dir() {
        Some(dir) if dir.exists() => println!("   Overrides: {}", dir.display()),
        Some(dir) => println!("   Overrides: {} (not created yet)", dir.display()),
        None => println!("   Overrides: (no data directory on this system)"),
    }
    println!("   Drop an edited <id>.md there; the next `trimly predict` uses it.");
    println!();
    Ok(())
}

/// Show a prompt template, section by section
pub fn cmd_prompts_show(prompt_id: &str) -> Result<()> {
    let id = parse_prompt_id(prompt_id)?;
    let mut library = PromptLibrary::new();
    let prompt = library.get(id)?;

    println!(
        "{} v{} ({})",
        prompt.metadata.id,
        prompt.metadata.version,
        match &prompt.override_path {
            Some(path) => format!("override at {}", path.display()),
            None => "embedded".to_string(),
        }
    );
    if let Some(system) = prompt.system_section() {
        println!();
        println!("--- System ---");
        println!("{}", system.trim());
    }
    println!();
    println!("--- User template ---");
    println!("{}", prompt.user_section().unwrap_or(prompt.content.as_str()).trim());
    Ok(())
}

/// Show a prompt exactly as it would be sent, filled from the journal at `now`
pub fn cmd_prompts_render(journal: &Journal, prompt_id: &str, now: NaiveDateTime) -> Result<()> {
    let rendered = match parse_prompt_id(prompt_id)? {
        PromptId::PredictCraving => CravingPredictor::new(journal, None).render_prompt(now)?,
    };

    if let Some(system) = &rendered.system {
        println!("--- System ---");
        println!("{}", system);
        println!();
    }
    println!("--- User ({}) ---", now.format("%Y-%m-%d %H:%M"));
    println!("{}", rendered.user.trim());
    Ok(())
}
