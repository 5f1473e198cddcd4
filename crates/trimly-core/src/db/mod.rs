//! SQLite-backed log store with connection pooling and migrations
//!
//! Each named collection is one row in the `collections` table holding the
//! collection's JSON document. There are no per-record rows and no indices
//! beyond the primary key: the engine only ever reads and writes whole
//! collections.
//!
//! - `collections` - `LogStore` implementation and per-collection stats

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OptionalExtension;
use tracing::info;

use crate::error::{Error, Result};

mod collections;

pub use collections::CollectionStats;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Environment variable for database encryption key
pub const DB_KEY_ENV: &str = "TRIMLY_DB_KEY";

/// Derive an encryption key from a passphrase using Argon2
///
/// Uses a fixed application salt so the same passphrase always produces the same key,
/// regardless of database path. This allows moving/renaming/restoring the database freely.
fn derive_key(passphrase: &str) -> Result<String> {
    use argon2::{password_hash::SaltString, Argon2, PasswordHasher};

    // Fixed application salt - changing this would invalidate all existing encrypted databases
    const APP_SALT: &[u8; 16] = b"trimly-salt-v1-x";

    let salt = SaltString::encode_b64(APP_SALT)
        .map_err(|e| Error::Encryption(format!("Failed to create salt: {}", e)))?;

    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| Error::Encryption(format!("Failed to derive key: {}", e)))?;

    // Hex-encode the raw hash for use as a SQLCipher key literal
    let hash_str = hash
        .hash
        .ok_or_else(|| Error::Encryption("No hash output".to_string()))?;
    Ok(hex::encode(hash_str.as_bytes()))
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Whether connections are keyed with a passphrase
    keyed: bool,
}

impl Database {
    /// Open (or create) an encrypted database
    ///
    /// Requires the `TRIMLY_DB_KEY` environment variable. Use
    /// `new_unencrypted()` for development/testing without encryption.
    pub fn new(path: &str) -> Result<Self> {
        let encryption_key = std::env::var(DB_KEY_ENV).ok();
        match encryption_key {
            Some(key) => Self::new_with_key(path, Some(&key)),
            None => Err(Error::Encryption(format!(
                "Database encryption required. Set {} environment variable with your passphrase, \
                or use --no-encrypt for unencrypted databases (not recommended).",
                DB_KEY_ENV
            ))),
        }
    }

    /// Create a new unencrypted database connection pool
    ///
    /// WARNING: health data is stored in plain text. Only use for development
    /// or testing.
    pub fn new_unencrypted(path: &str) -> Result<Self> {
        Self::new_with_key(path, None)
    }

    /// Create a new database with an explicit encryption key
    pub fn new_with_key(path: &str, passphrase: Option<&str>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);

        let pool = if let Some(pass) = passphrase {
            let key = derive_key(pass)?;
            let key_pragma = format!("PRAGMA key = 'x\"{}\"';", key);

            // Every pooled connection must be keyed before first use
            let manager = manager.with_init(move |conn| {
                conn.execute_batch(&key_pragma)?;
                Ok(())
            });

            Pool::builder().max_size(4).build(manager)?
        } else {
            Pool::builder().max_size(4).build(manager)?
        };

        let db = Self {
            pool,
            keyed: passphrase.is_some(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because every pooled
    /// connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "trimly_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any leftover file from an earlier run
        let _ = std::fs::remove_file(&path);

        Self::new_unencrypted(&path.to_string_lossy())
    }

    /// Check if the database is encrypted
    ///
    /// True only for keyed connections on a SQLCipher build, which reports a
    /// `cipher_version`.
    pub fn is_encrypted(&self) -> Result<bool> {
        if !self.keyed {
            return Ok(false);
        }
        let conn = self.conn()?;
        let version: Option<String> = conn
            .query_row("PRAGMA cipher_version;", [], |row| row.get(0))
            .optional()?;
        Ok(version.is_some())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the single writer
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: safe for most power-loss scenarios
            PRAGMA synchronous = NORMAL;

            -- One row per named collection, value is the JSON document
            CREATE TABLE IF NOT EXISTS collections (
                name TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Collection, LogStore};

    #[test]
    fn test_derive_key_is_stable() {
        let a = derive_key("correct horse").unwrap();
        let b = derive_key("correct horse").unwrap();
        let c = derive_key("battery staple").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn test_unencrypted_database_reports_plaintext() {
        let db = Database::in_memory().unwrap();
        assert!(!db.is_encrypted().unwrap());
    }

    #[test]
    fn test_keyed_database_reports_encrypted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyed.db");
        let db = Database::new_with_key(&path.to_string_lossy(), Some("correct horse")).unwrap();
        db.write(Collection::DailyWins, "[]").unwrap();
        assert!(db.is_encrypted().unwrap());
    }

    #[test]
    fn test_reopen_keeps_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trimly.db");
        let path = path.to_string_lossy().to_string();

        {
            let db = Database::new_unencrypted(&path).unwrap();
            db.write(Collection::SurveyData, r#"{"goalWeight":150}"#)
                .unwrap();
        }

        let db = Database::new_unencrypted(&path).unwrap();
        assert_eq!(
            db.read(Collection::SurveyData).unwrap().as_deref(),
            Some(r#"{"goalWeight":150}"#)
        );
    }
}
