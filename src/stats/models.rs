//! Data models for statistics tracking
//!
//! These structures represent the data produced by finished sessions and
//! stored in and queried from the stats database.

use serde::{Deserialize, Serialize};

use crate::domain::{GameKind, Tier};

/// Uniform performance record of one completed session
///
/// Matching sessions fill `attempts`, `matched_pairs` and `total_pairs`;
/// recognition sessions fill `score`, `total_rounds` and `max_streak`. Fields
/// are optional because records may also come from older databases or other
/// front ends, and scoring must cope with missing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub game_kind: GameKind,
    pub tier: Tier,

    // Matching
    pub attempts: Option<u32>,
    pub matched_pairs: Option<u32>,
    pub total_pairs: Option<u32>,

    // Recognition
    pub score: Option<u32>,
    pub total_rounds: Option<u32>,
    pub max_streak: Option<u32>,

    pub time_spent_secs: u64,
}

impl PerformanceRecord {
    /// Record of a finished matching board
    pub fn matching(tier: Tier, attempts: u32, total_pairs: u32, time_spent_secs: u64) -> Self {
        Self {
            game_kind: GameKind::Matching,
            tier,
            attempts: Some(attempts),
            matched_pairs: Some(total_pairs),
            total_pairs: Some(total_pairs),
            score: None,
            total_rounds: None,
            max_streak: None,
            time_spent_secs,
        }
    }

    /// Record of a finished quiz
    pub fn recognition(
        tier: Tier,
        score: u32,
        total_rounds: u32,
        max_streak: u32,
        time_spent_secs: u64,
    ) -> Self {
        Self {
            game_kind: GameKind::Recognition,
            tier,
            attempts: None,
            matched_pairs: None,
            total_pairs: None,
            score: Some(score),
            total_rounds: Some(total_rounds),
            max_streak: Some(max_streak),
            time_spent_secs,
        }
    }
}

/// A completed session as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub record: PerformanceRecord,
    pub star_rating: u8,
    /// Timestamp (ms since epoch)
    pub completed_at: i64,
}

/// Best result per game kind and tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierBest {
    pub game_kind: GameKind,
    pub tier: Tier,
    pub best_stars: u8,
    pub sessions: u64,
}

/// Summary statistics for the history view
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub total_sessions: u64,
    pub matching_sessions: u64,
    pub recognition_sessions: u64,
    pub total_time_secs: u64,
    pub badges_owned: u64,

    // Sorted by game kind, then tier
    pub bests: Vec<TierBest>,
}
