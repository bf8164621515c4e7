//! Progress tracking for Emozion
//!
//! Stores finished sessions and owned badges in a SQLite database
//! (`~/.emozion/stats.db`).
//!
//! # Flow
//!
//! ```text
//! snapshot()  ──►  engine plays  ──►  PerformanceRecord
//!                                          │
//!                                          ▼
//!                    complete_session(record, &snapshot)
//!                                          │
//!                         record_session + BadgeManager::merge
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let stats = StatsManager::new()?;
//! let event = stats.finish_session(record)?;
//! for badge in &event.newly_earned {
//!     println!("{} {}", badge.icon, badge.name);
//! }
//! ```

pub mod achievements;
mod db;
mod models;
mod queries;
mod recorder;
mod scoring;

pub use achievements::{BADGES, Badge, BadgeDefinition, BadgeId, BadgeManager};
pub use db::StatsDb;
pub use models::{PerformanceRecord, SessionRecord, StatsSummary, TierBest};
pub use queries::StatsQuery;
pub use recorder::StatsRecorder;
pub use scoring::{CompletionEvent, MISSING_ATTEMPTS, ProgressSnapshot, complete_session, star_rating};

use anyhow::Result;

/// Central manager for progress tracking
///
/// Thread-safe through internal mutex on the database connection.
#[derive(Clone)]
pub struct StatsManager {
    db: StatsDb,
}

impl StatsManager {
    /// Create a new StatsManager with the default database location
    pub fn new() -> Result<Self> {
        let db = StatsDb::open_default()?;
        Ok(Self { db })
    }

    /// Create a StatsManager with a custom database path
    pub fn with_path(path: &std::path::Path) -> Result<Self> {
        let db = StatsDb::open(path)?;
        Ok(Self { db })
    }

    /// Get a recorder for writing sessions
    pub fn recorder(&self) -> StatsRecorder {
        StatsRecorder::new(self.db.clone())
    }

    /// Get a query interface for reading history
    pub fn query(&self) -> StatsQuery {
        StatsQuery::new(self.db.clone())
    }

    /// Get the owned badge store
    pub fn badges(&self) -> BadgeManager {
        BadgeManager::new(self.db.conn.clone())
    }

    /// Owned badges and completed tiers as of now
    pub fn snapshot(&self) -> Result<ProgressSnapshot> {
        Ok(ProgressSnapshot {
            owned: self.badges().owned_ids()?,
            completed_tiers: self.query().all_completed_tiers()?,
        })
    }

    /// Score, persist and award a finished session
    ///
    /// `newly_earned` in the returned event holds only badges that were not
    /// owned before, stamped with their unlock time.
    pub fn finish_session(&self, record: PerformanceRecord) -> Result<CompletionEvent> {
        let snapshot = self.snapshot()?;
        let mut event = complete_session(record, &snapshot);

        self.recorder().record_session(&event.record, event.star_rating)?;
        event.newly_earned = self.badges().merge(&event.newly_earned)?;

        tracing::info!(
            "{} {} finished: {} stars, {} new badges",
            event.game_kind,
            event.tier,
            event.star_rating,
            event.newly_earned.len()
        );
        Ok(event)
    }

    /// Reset all progress (sessions and badges)
    pub fn reset_all(&self) -> Result<()> {
        self.db.reset_all()?;
        self.badges().reset()
    }
}
