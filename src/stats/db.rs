//! SQLite database connection and schema management for statistics
//!
//! Manages the `~/.emozion/stats.db` database with automatic schema migration.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;

use crate::config::Config;

/// Database wrapper shared by the recorder, queries and badge manager
#[derive(Clone)]
pub struct StatsDb {
    /// Database connection - pub(crate) for BadgeManager access
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl StatsDb {
    /// Open or create the stats database at the default location (~/.emozion/stats.db)
    pub fn open_default() -> Result<Self> {
        let db_path = Config::global_config_dir().join("stats.db");
        Self::open(&db_path)
    }

    /// Open or create the stats database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create stats dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open stats db: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        tracing::debug!("Opened stats db at {}", path.display());
        Ok(db)
    }

    /// Get a reference to the connection (for queries)
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("Stats DB lock poisoned"))
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()?;
        Ok(())
    }

    /// Run any pending migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        // Get current schema version
        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        // Migration 2: star rating per session, lookup index for mastery checks
        if version < 2 {
            let has_star_rating: bool = conn
                .prepare("SELECT COUNT(*) FROM pragma_table_info('sessions') WHERE name = 'star_rating'")
                .and_then(|mut s| s.query_row([], |r| r.get::<_, i32>(0)))
                .map(|c| c > 0)
                .unwrap_or(false);

            if !has_star_rating {
                conn.execute_batch(
                    "ALTER TABLE sessions ADD COLUMN star_rating INTEGER NOT NULL DEFAULT 1;",
                )?;
            }

            conn.execute_batch(
                "CREATE INDEX IF NOT EXISTS idx_session_kind_tier ON sessions(game_kind, tier);",
            )?;
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
        }

        Ok(())
    }

    /// Delete all session history
    /// Note: This does NOT reset owned badges - use BadgeManager::reset() for that
    pub fn reset_all(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM sessions", [])?;
        Ok(())
    }
}

/// SQL schema for the stats database
const SCHEMA_SQL: &str = r#"
-- Completed sessions (one row per finished game)
CREATE TABLE IF NOT EXISTS sessions (
    session_id TEXT PRIMARY KEY,
    game_kind TEXT NOT NULL,
    tier TEXT NOT NULL,
    attempts INTEGER,
    matched_pairs INTEGER,
    total_pairs INTEGER,
    score INTEGER,
    total_rounds INTEGER,
    max_streak INTEGER,
    time_spent_secs INTEGER NOT NULL DEFAULT 0,
    star_rating INTEGER NOT NULL DEFAULT 1,
    completed_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_session_completed_at ON sessions(completed_at);

-- Owned badges, timestamped on first insertion
CREATE TABLE IF NOT EXISTS badges (
    id TEXT PRIMARY KEY,
    earned_at INTEGER NOT NULL
);

-- Schema versioning
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_stats.db");
        let db = StatsDb::open(&db_path).unwrap();

        // Verify tables exist
        let conn = db.conn().unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"sessions".to_string()));
        assert!(tables.contains(&"badges".to_string()));

        let version: i32 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, 2);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("stats.db");
        {
            let db = StatsDb::open(&db_path).unwrap();
            db.conn()
                .unwrap()
                .execute("INSERT INTO badges (id, earned_at) VALUES ('persistent', 1)", [])
                .unwrap();
        }
        let db = StatsDb::open(&db_path).unwrap();
        let count: i64 = db
            .conn()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM badges", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
