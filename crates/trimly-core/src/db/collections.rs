//! Collection document operations

use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::Result;
use crate::store::{Collection, LogStore};

/// Size information about one stored collection
#[derive(Debug, Clone, serde::Serialize)]
pub struct CollectionStats {
    pub name: String,
    pub bytes: usize,
    pub updated_at: Option<String>,
}

impl Database {
    /// Sizes and last-write times of all stored collections
    pub fn collection_stats(&self) -> Result<Vec<CollectionStats>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT name, LENGTH(document), updated_at FROM collections ORDER BY name",
        )?;

        let stats = stmt
            .query_map([], |row| {
                Ok(CollectionStats {
                    name: row.get(0)?,
                    bytes: row.get::<_, i64>(1)? as usize,
                    updated_at: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(stats)
    }
}

impl LogStore for Database {
    fn read(&self, collection: Collection) -> Result<Option<String>> {
        let conn = self.conn()?;
        let document = conn
            .query_row(
                "SELECT document FROM collections WHERE name = ?",
                params![collection.key()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(document)
    }

    fn write(&self, collection: Collection, document: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO collections (name, document, updated_at)
            VALUES (?1, ?2, CURRENT_TIMESTAMP)
            ON CONFLICT(name) DO UPDATE SET
                document = excluded.document,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![collection.key(), document],
        )?;
        Ok(())
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
