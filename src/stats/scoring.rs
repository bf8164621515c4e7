//! Star ratings and the completion summary of a finished session

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use super::achievements::{Badge, BadgeId, check_mastery, evaluate};
use super::models::PerformanceRecord;
use crate::domain::{GameKind, Tier};

/// Attempts assumed when a matching record carries none
pub const MISSING_ATTEMPTS: u32 = 999;

/// Star rating in `1..=3`
pub fn star_rating(record: &PerformanceRecord) -> u8 {
    match record.game_kind {
        GameKind::Recognition => {
            let (score, total) = (record.score.unwrap_or(0), record.total_rounds.unwrap_or(0));
            if total == 0 {
                return 1;
            }
            let p = score as f64 / total as f64;
            if p >= 1.0 {
                3
            } else if p >= 0.6 {
                2
            } else {
                1
            }
        }
        GameKind::Matching => {
            let attempts = record.attempts.unwrap_or(MISSING_ATTEMPTS) as f64;
            let pairs = record.total_pairs.unwrap_or(1) as f64;
            if attempts <= pairs + 2.0 {
                3
            } else if attempts <= pairs * 1.5 {
                2
            } else {
                1
            }
        }
    }
}

/// Persisted progress read when a session starts
#[derive(Debug, Clone, Default)]
pub struct ProgressSnapshot {
    pub owned: HashSet<BadgeId>,
    pub completed_tiers: HashMap<GameKind, BTreeSet<Tier>>,
}

impl ProgressSnapshot {
    /// Completed tiers of one game kind
    pub fn tiers_for(&self, game_kind: GameKind) -> BTreeSet<Tier> {
        self.completed_tiers.get(&game_kind).cloned().unwrap_or_default()
    }
}

/// Everything the summary screen needs about a finished session
#[derive(Debug, Clone, Serialize)]
pub struct CompletionEvent {
    pub game_kind: GameKind,
    pub tier: Tier,
    pub record: PerformanceRecord,
    pub star_rating: u8,
    pub newly_earned: Vec<Badge>,
}

/// Rate a finished session and collect the badges it unlocks
pub fn complete_session(record: PerformanceRecord, snapshot: &ProgressSnapshot) -> CompletionEvent {
    let mut newly_earned = evaluate(&record, &snapshot.owned);
    let tiers = snapshot.tiers_for(record.game_kind);
    if let Some(badge) = check_mastery(record.game_kind, record.tier, &tiers, &snapshot.owned) {
        newly_earned.push(badge);
    }

    CompletionEvent {
        game_kind: record.game_kind,
        tier: record.tier,
        star_rating: star_rating(&record),
        record,
        newly_earned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognition_stars() {
        let stars = |score| star_rating(&PerformanceRecord::recognition(Tier::Medium, score, 10, 0, 10));
        assert_eq!(stars(10), 3);
        assert_eq!(stars(8), 2);
        assert_eq!(stars(6), 2);
        assert_eq!(stars(5), 1);
        assert_eq!(stars(0), 1);
    }

    #[test]
    fn test_recognition_without_rounds_is_one_star() {
        let mut record = PerformanceRecord::recognition(Tier::Easy, 0, 0, 0, 0);
        assert_eq!(star_rating(&record), 1);
        record.total_rounds = None;
        assert_eq!(star_rating(&record), 1);
    }

    #[test]
    fn test_matching_stars() {
        let stars = |attempts| star_rating(&PerformanceRecord::matching(Tier::Hard, attempts, 15, 10));
        assert_eq!(stars(15), 3);
        assert_eq!(stars(17), 3);
        assert_eq!(stars(18), 2);
        assert_eq!(stars(22), 2);
        assert_eq!(stars(23), 1);
    }

    #[test]
    fn test_matching_missing_attempts_is_one_star() {
        let mut record = PerformanceRecord::matching(Tier::Easy, 5, 5, 10);
        record.attempts = None;
        assert_eq!(star_rating(&record), 1);

        // Missing pairs count as one
        record.attempts = Some(3);
        record.total_pairs = None;
        assert_eq!(star_rating(&record), 3);
    }

    #[test]
    fn test_stars_never_increase_with_attempts() {
        let mut previous = 3;
        for attempts in 5..60 {
            let stars = star_rating(&PerformanceRecord::matching(Tier::Easy, attempts, 5, 0));
            assert!((1..=3).contains(&stars));
            assert!(stars <= previous);
            previous = stars;
        }
    }

    #[test]
    fn test_complete_session_scenario() {
        let record = PerformanceRecord::matching(Tier::Easy, 5, 5, 42);
        let event = complete_session(record.clone(), &ProgressSnapshot::default());
        assert_eq!(event.star_rating, 3);
        assert_eq!(event.game_kind, GameKind::Matching);
        assert_eq!(event.record, record);
        let ids: Vec<_> = event.newly_earned.iter().map(|b| b.id).collect();
        assert_eq!(
            ids,
            vec![BadgeId::FirstSession, BadgeId::GoldStar, BadgeId::MemoryExpert]
        );
    }

    #[test]
    fn test_mastery_counts_current_tier() {
        let mut snapshot = ProgressSnapshot::default();
        snapshot
            .completed_tiers
            .insert(GameKind::Recognition, [Tier::Easy, Tier::Medium].into());
        snapshot.owned.insert(BadgeId::FirstSession);

        let record = PerformanceRecord::recognition(Tier::Hard, 3, 15, 2, 100);
        let event = complete_session(record, &snapshot);
        assert_eq!(
            event.newly_earned.last().map(|b| b.id),
            Some(BadgeId::EmotionMaster)
        );

        // Tiers of the other game do not count
        let record = PerformanceRecord::matching(Tier::Hard, 40, 15, 100);
        let event = complete_session(record, &snapshot);
        assert!(event.newly_earned.iter().all(|b| b.id != BadgeId::EmotionMaster));
    }

    #[test]
    fn test_event_serializes_game_kind_lowercase() {
        let record = PerformanceRecord::recognition(Tier::Medium, 8, 10, 6, 30);
        let event = complete_session(record, &ProgressSnapshot::default());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["game_kind"], "recognition");
        assert_eq!(json["tier"], "medium");
        assert_eq!(json["star_rating"], 2);
    }
}
