//! Stats recorder - writes finished sessions to the database

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use super::db::StatsDb;
use super::models::PerformanceRecord;

/// Records statistics to the database
#[derive(Clone)]
pub struct StatsRecorder {
    db: StatsDb,
}

impl StatsRecorder {
    pub fn new(db: StatsDb) -> Self {
        Self { db }
    }

    /// Record a completed session, returning its generated id
    pub fn record_session(&self, record: &PerformanceRecord, star_rating: u8) -> Result<String> {
        let session_id = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp_millis();

        let conn = self.db.conn()?;
        conn.execute(
            r#"INSERT INTO sessions
               (session_id, game_kind, tier, attempts, matched_pairs, total_pairs,
                score, total_rounds, max_streak, time_spent_secs, star_rating, completed_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"#,
            rusqlite::params![
                session_id,
                record.game_kind.as_str(),
                record.tier.as_str(),
                record.attempts,
                record.matched_pairs,
                record.total_pairs,
                record.score,
                record.total_rounds,
                record.max_streak,
                record.time_spent_secs as i64,
                star_rating,
                now,
            ],
        )?;

        tracing::debug!(
            "Recorded {} session {} ({} stars)",
            record.game_kind,
            session_id,
            star_rating
        );
        Ok(session_id)
    }
}
