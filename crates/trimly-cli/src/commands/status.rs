//! Status command implementation

use std::fs;
use std::path::Path;

use anyhow::Result;
use trimly_core::db::DB_KEY_ENV;
use trimly_core::{Config, Journal};

use super::{open_db, open_journal};

pub fn cmd_status(db_path: &Path, config: &Config, no_encrypt: bool) -> Result<()> {
    println!();
    println!("📊 Trimly Status");
    println!("   ─────────────────────────────────────────────────────────────");

    println!("   Database: {}", db_path.display());

    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    let has_key = std::env::var(DB_KEY_ENV).is_ok();
    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if has_key {
        println!("   🔒 Encryption: ENABLED ({}=***)", DB_KEY_ENV);
    } else {
        println!("   ❌ Encryption: REQUIRED but {} not set", DB_KEY_ENV);
    }

    match &config.source {
        Some(path) => println!("   Config: {}", path.display()),
        None => println!("   Config: (built-in defaults)"),
    }
    println!(
        "   AI: {} / {} ({})",
        config.ai.backend,
        config.ai.model,
        config.ai.host.as_deref().unwrap_or("no host configured")
    );

    if db_path.exists() {
        match open_db(db_path, no_encrypt) {
            Ok(db) => {
                match db.is_encrypted() {
                    Ok(true) => println!("   🔒 On disk: encrypted (SQLCipher)"),
                    Ok(false) => println!("   ⚠️  On disk: plain text"),
                    Err(e) => println!("   ❌ Could not check encryption: {}", e),
                }
                println!();
                print_counts(&open_journal(&db));
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {}", e);
                if !no_encrypt && !has_key {
                    println!("      Set {} or use --no-encrypt", DB_KEY_ENV);
                } else if has_key {
                    println!("      (Check if {} is correct)", DB_KEY_ENV);
                }
            }
        }
    }

    println!();
    Ok(())
}

/// Entries per collection
pub fn print_counts(journal: &Journal) {
    for (collection, count) in journal.counts() {
        println!("   {:<16} {}", collection.key(), count);
    }
}
