//! Badge checking logic
//!
//! Pure functions deciding which badges a finished session unlocks. Nothing
//! here reads the clock or the database: the same record and owned set always
//! produce the same badges.

use std::collections::{BTreeSet, HashSet};

use super::definitions::{Badge, BadgeId};
use crate::domain::{GameKind, Tier};
use crate::stats::models::PerformanceRecord;

/// Matching efficiency (pairs / attempts) needed for a gold star
pub const GOLD_EFFICIENCY: f64 = 0.9;
/// Matching efficiency needed for a silver star
pub const SILVER_EFFICIENCY: f64 = 0.7;
/// Recognition accuracy needed for a silver star
pub const SILVER_ACCURACY: f64 = 0.8;
/// Attempts allowed per pair for the memory expert badge
pub const MEMORY_EXPERT_RATIO: f64 = 1.5;

/// Evaluate a finished session against every badge rule
///
/// Badges already in `owned` are left out. Candidates are not de-duplicated
/// against each other; every rule yields a distinct badge anyway.
pub fn evaluate(record: &PerformanceRecord, owned: &HashSet<BadgeId>) -> Vec<Badge> {
    let mut candidates = vec![BadgeId::FirstSession];

    match record.game_kind {
        GameKind::Matching => candidates.extend(check_matching_badges(record)),
        GameKind::Recognition => candidates.extend(check_recognition_badges(record)),
    }

    if record.tier == Tier::Hard {
        candidates.push(BadgeId::Persistent);
    }

    candidates
        .into_iter()
        .filter(|id| !owned.contains(id))
        .map(Badge::earned)
        .collect()
}

/// Star and memory badges for a matching board
///
/// Records with missing or zero counts earn nothing here.
fn check_matching_badges(record: &PerformanceRecord) -> Vec<BadgeId> {
    let mut earned = Vec::new();
    let (Some(attempts), Some(matched_pairs), Some(total_pairs)) =
        (record.attempts, record.matched_pairs, record.total_pairs)
    else {
        return earned;
    };
    if attempts == 0 || matched_pairs == 0 || total_pairs == 0 {
        return earned;
    }

    let efficiency = total_pairs as f64 / attempts as f64;
    if efficiency >= GOLD_EFFICIENCY {
        earned.push(BadgeId::GoldStar);
    } else if efficiency >= SILVER_EFFICIENCY {
        earned.push(BadgeId::SilverStar);
    }

    // Independent of the stars
    if attempts as f64 <= total_pairs as f64 * MEMORY_EXPERT_RATIO {
        earned.push(BadgeId::MemoryExpert);
    }

    earned
}

/// Star, streak and pro badges for a quiz
fn check_recognition_badges(record: &PerformanceRecord) -> Vec<BadgeId> {
    let mut earned = Vec::new();
    let (Some(score), Some(total_rounds)) = (record.score, record.total_rounds) else {
        return earned;
    };
    if total_rounds == 0 {
        return earned;
    }

    let perfect = score >= total_rounds;
    let accuracy = score as f64 / total_rounds as f64;
    if perfect {
        earned.push(BadgeId::GoldStar);
    } else if accuracy >= SILVER_ACCURACY {
        earned.push(BadgeId::SilverStar);
    }

    let max_streak = record.max_streak.unwrap_or(0);
    if max_streak >= 10 {
        earned.push(BadgeId::Streak10);
    } else if max_streak >= 5 {
        earned.push(BadgeId::Streak5);
    }

    if perfect && max_streak >= 5 {
        earned.push(BadgeId::RecognitionPro);
    }

    earned
}

/// Mastery badge once every tier of one game has been completed
///
/// `completed_tiers` holds the tiers of `game_kind` finished before; `tier` is
/// the one just finished.
pub fn check_mastery(
    game_kind: GameKind,
    tier: Tier,
    completed_tiers: &BTreeSet<Tier>,
    owned: &HashSet<BadgeId>,
) -> Option<Badge> {
    if owned.contains(&BadgeId::EmotionMaster) {
        return None;
    }
    if !Tier::ALL.iter().all(|t| *t == tier || completed_tiers.contains(t)) {
        return None;
    }
    tracing::debug!("All tiers of {} completed", game_kind);
    Some(Badge::earned(BadgeId::EmotionMaster))
}
