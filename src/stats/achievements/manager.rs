//! Badge Manager - owned badge persistence
//!
//! Merges newly earned badges into the database by id. A badge keeps the
//! timestamp of its first insertion forever; re-submitting an owned id is a
//! no-op.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use rusqlite::Connection;

use super::definitions::{BADGES, Badge, BadgeId};

/// Owned badge store backed by the stats database
#[derive(Clone)]
pub struct BadgeManager {
    conn: Arc<Mutex<Connection>>,
}

impl BadgeManager {
    /// Create a new manager with a database connection
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Get current timestamp in milliseconds
    fn now_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("Stats DB lock poisoned"))
    }

    /// Get all owned badge IDs
    ///
    /// Unknown ids (e.g. from a newer version) are skipped.
    pub fn owned_ids(&self) -> Result<HashSet<BadgeId>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id FROM badges")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .filter_map(|r| r.ok())
            .filter_map(|id| BadgeId::from_str(&id))
            .collect();
        Ok(ids)
    }

    /// Owned badges with their unlock times, oldest first
    pub fn owned_badges(&self) -> Result<Vec<Badge>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, earned_at FROM badges ORDER BY earned_at, id")?;
        let badges = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .filter_map(|r| r.ok())
            .filter_map(|(id, at)| {
                let id = BadgeId::from_str(&id)?;
                Some(Badge::earned_at(id, DateTime::from_timestamp_millis(at)?))
            })
            .collect();
        Ok(badges)
    }

    /// Whole badge catalog, owned entries marked as earned
    pub fn collection(&self) -> Result<Vec<Badge>> {
        let owned = self.owned_badges()?;
        Ok(BADGES
            .iter()
            .map(|def| {
                owned
                    .iter()
                    .find(|b| b.id == def.id)
                    .cloned()
                    .unwrap_or_else(|| def.to_badge())
            })
            .collect())
    }

    /// Merge earned badges by id
    ///
    /// Returns the badges that were actually inserted, stamped with their
    /// unlock time. Already-owned ids and duplicates within `badges` are
    /// skipped and keep their original timestamp.
    pub fn merge(&self, badges: &[Badge]) -> Result<Vec<Badge>> {
        let now = Self::now_ms();
        let earned_at = DateTime::from_timestamp_millis(now).unwrap_or_else(Utc::now);

        let conn = self.conn()?;
        let mut inserted = Vec::new();
        for badge in badges {
            let changed = conn.execute(
                "INSERT OR IGNORE INTO badges (id, earned_at) VALUES (?1, ?2)",
                (badge.id.as_str(), now),
            )?;
            if changed > 0 {
                tracing::info!("Badge unlocked: {} {}", badge.icon, badge.name);
                inserted.push(Badge::earned_at(badge.id, earned_at));
            }
        }
        Ok(inserted)
    }

    /// Get count of owned badges
    pub fn owned_count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM badges", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    /// Forget every owned badge
    pub fn reset(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM badges", [])?;
        Ok(())
    }
}
