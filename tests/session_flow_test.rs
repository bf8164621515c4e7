//! End-to-end tests: engine -> finish_session -> stats database

mod common;

use std::collections::BTreeSet;

use common::*;
use emozion::catalog::EmotionCatalog;
use emozion::game::MatchingEngine;
use emozion::stats::{Badge, BadgeId, StatsManager};
use emozion::{GameKind, Tier};

fn ids(badges: &[Badge]) -> Vec<BadgeId> {
    badges.iter().map(|b| b.id).collect()
}

#[test]
fn test_perfect_matching_session_is_persisted() {
    let (_dir, stats) = temp_stats();

    let record = finished_matching(Tier::Easy, 1);
    assert_eq!(record.attempts, Some(5));

    let event = stats.finish_session(record).unwrap();
    assert_eq!(event.game_kind, GameKind::Matching);
    assert_eq!(event.star_rating, 3);
    assert_eq!(
        ids(&event.newly_earned),
        vec![BadgeId::FirstSession, BadgeId::GoldStar, BadgeId::MemoryExpert]
    );

    let sessions = stats.query().recent_sessions(5).unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].record, event.record);
}

#[test]
fn test_badges_keep_first_earned_at() {
    let (_dir, stats) = temp_stats();
    stats.finish_session(finished_matching(Tier::Easy, 2)).unwrap();

    let before = stats.badges().owned_badges().unwrap();
    let gold = before.iter().find(|b| b.id == BadgeId::GoldStar).unwrap().clone();
    assert!(gold.earned_at.is_some());

    std::thread::sleep(std::time::Duration::from_millis(5));
    let inserted = stats.badges().merge(&[Badge::earned(BadgeId::GoldStar)]).unwrap();
    assert!(inserted.is_empty());

    let event = stats.finish_session(finished_matching(Tier::Easy, 3)).unwrap();
    assert!(event.newly_earned.is_empty());

    let after = stats.badges().owned_badges().unwrap();
    assert_eq!(after, before);
}

#[test]
fn test_mastery_fires_once_on_third_tier() {
    let (_dir, stats) = temp_stats();

    let easy = stats.finish_session(finished_recognition(Tier::Easy, 4)).unwrap();
    assert!(!ids(&easy.newly_earned).contains(&BadgeId::EmotionMaster));

    let medium = stats.finish_session(finished_recognition(Tier::Medium, 5)).unwrap();
    assert!(!ids(&medium.newly_earned).contains(&BadgeId::EmotionMaster));

    // Repeating a tier does not help
    let again = stats.finish_session(finished_recognition(Tier::Medium, 6)).unwrap();
    assert!(!ids(&again.newly_earned).contains(&BadgeId::EmotionMaster));

    let hard = stats.finish_session(finished_recognition(Tier::Hard, 7)).unwrap();
    let hard_ids = ids(&hard.newly_earned);
    assert!(hard_ids.contains(&BadgeId::Persistent));
    assert_eq!(hard_ids.last(), Some(&BadgeId::EmotionMaster));

    // Completing the other game later unlocks it no second time
    for (i, tier) in Tier::ALL.into_iter().enumerate() {
        let event = stats.finish_session(finished_matching(tier, 10 + i as u64)).unwrap();
        assert!(!ids(&event.newly_earned).contains(&BadgeId::EmotionMaster));
    }

    let owned = stats.badges().owned_ids().unwrap();
    assert!(owned.contains(&BadgeId::EmotionMaster));
}

#[test]
fn test_abandoned_session_saves_nothing() {
    let (_dir, stats) = temp_stats();

    let mut rng = seeded_rng(8);
    let mut engine = MatchingEngine::start(Tier::Medium, EmotionCatalog::builtin(), &mut rng);
    let (first, second) = card_pairs(&engine)[0];
    engine.flip_card(first);
    engine.flip_card(second);
    engine.resolve_pending();
    assert!(engine.completion().is_none());
    drop(engine);

    let summary = stats.query().summary().unwrap();
    assert_eq!(summary.total_sessions, 0);
    assert!(stats.badges().owned_ids().unwrap().is_empty());
}

#[test]
fn test_history_survives_reopen() {
    let (dir, stats) = temp_stats();
    stats.finish_session(finished_recognition(Tier::Easy, 9)).unwrap();
    stats.finish_session(finished_matching(Tier::Hard, 9)).unwrap();
    drop(stats);

    let reopened = StatsManager::with_path(&dir.path().join("stats.db")).unwrap();
    let summary = reopened.query().summary().unwrap();
    assert_eq!(summary.total_sessions, 2);
    assert_eq!(summary.matching_sessions, 1);
    assert_eq!(summary.recognition_sessions, 1);

    let snapshot = reopened.snapshot().unwrap();
    assert_eq!(snapshot.completed_tiers[&GameKind::Matching], BTreeSet::from([Tier::Hard]));
    assert_eq!(snapshot.completed_tiers[&GameKind::Recognition], BTreeSet::from([Tier::Easy]));
    assert!(snapshot.owned.contains(&BadgeId::Persistent));
}
