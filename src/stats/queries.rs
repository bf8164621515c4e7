//! Stats query functions for reading session history
//!
//! Provides the reads behind the history view and the progress snapshot.

use std::collections::{BTreeSet, HashMap};

use anyhow::Result;
use rusqlite::{Connection, Row};

use super::db::StatsDb;
use super::models::{PerformanceRecord, SessionRecord, StatsSummary, TierBest};
use crate::domain::{GameKind, Tier};

/// Query interface for statistics
pub struct StatsQuery {
    db: StatsDb,
}

impl StatsQuery {
    pub fn new(db: StatsDb) -> Self {
        Self { db }
    }

    /// Most recent sessions first
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            r#"SELECT session_id, game_kind, tier, attempts, matched_pairs, total_pairs,
                      score, total_rounds, max_streak, time_spent_secs, star_rating, completed_at
               FROM sessions ORDER BY completed_at DESC, rowid DESC LIMIT ?1"#,
        )?;
        let sessions = stmt
            .query_map([limit as i64], session_from_row)?
            .filter_map(|r| r.ok())
            .flatten()
            .collect();
        Ok(sessions)
    }

    /// Tiers with at least one completed session of a game kind
    pub fn completed_tiers(&self, game_kind: GameKind) -> Result<BTreeSet<Tier>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare("SELECT DISTINCT tier FROM sessions WHERE game_kind = ?1")?;
        let tiers = stmt
            .query_map([game_kind.as_str()], |row| row.get::<_, String>(0))?
            .filter_map(|r| r.ok())
            .filter_map(|t| Tier::from_str(&t))
            .collect();
        Ok(tiers)
    }

    /// Completed tiers for every game kind
    pub fn all_completed_tiers(&self) -> Result<HashMap<GameKind, BTreeSet<Tier>>> {
        let mut all = HashMap::new();
        for kind in GameKind::ALL {
            all.insert(kind, self.completed_tiers(kind)?);
        }
        Ok(all)
    }

    /// Totals and best results for the history view
    pub fn summary(&self) -> Result<StatsSummary> {
        let conn = self.db.conn()?;

        let (total_sessions, total_time_secs): (u64, u64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(time_spent_secs), 0) FROM sessions",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let matching_sessions = Self::count_kind(&conn, GameKind::Matching)?;
        let recognition_sessions = Self::count_kind(&conn, GameKind::Recognition)?;
        let badges_owned: u64 = conn.query_row("SELECT COUNT(*) FROM badges", [], |r| r.get(0))?;

        let mut stmt = conn.prepare(
            r#"SELECT game_kind, tier, MAX(star_rating), COUNT(*)
               FROM sessions GROUP BY game_kind, tier"#,
        )?;
        let mut bests: Vec<TierBest> = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u8>(2)?,
                    row.get::<_, u64>(3)?,
                ))
            })?
            .filter_map(|r| r.ok())
            .filter_map(|(kind, tier, best_stars, sessions)| {
                Some(TierBest {
                    game_kind: GameKind::from_str(&kind)?,
                    tier: Tier::from_str(&tier)?,
                    best_stars,
                    sessions,
                })
            })
            .collect();
        bests.sort_by_key(|b| (b.game_kind, b.tier));

        Ok(StatsSummary {
            total_sessions,
            matching_sessions,
            recognition_sessions,
            total_time_secs,
            badges_owned,
            bests,
        })
    }

    fn count_kind(conn: &Connection, kind: GameKind) -> Result<u64> {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM sessions WHERE game_kind = ?1",
            [kind.as_str()],
            |r| r.get(0),
        )?;
        Ok(count)
    }
}

/// Map a sessions row; rows with unknown game kinds or tiers become `None`
fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Option<SessionRecord>> {
    let game_kind: String = row.get(1)?;
    let tier: String = row.get(2)?;
    let Some(game_kind) = GameKind::from_str(&game_kind) else {
        return Ok(None);
    };

    let record = PerformanceRecord {
        game_kind,
        // Stored tiers are always valid, but stay lenient for hand-edited files
        tier: Tier::parse_lenient(&tier),
        attempts: row.get(3)?,
        matched_pairs: row.get(4)?,
        total_pairs: row.get(5)?,
        score: row.get(6)?,
        total_rounds: row.get(7)?,
        max_streak: row.get(8)?,
        time_spent_secs: row.get::<_, i64>(9)?.max(0) as u64,
    };

    Ok(Some(SessionRecord {
        session_id: row.get(0)?,
        record,
        star_rating: row.get(10)?,
        completed_at: row.get(11)?,
    }))
}
