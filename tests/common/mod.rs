//! Shared test utilities for game and stats integration tests

#![allow(dead_code)]

use std::collections::HashMap;

use emozion::Tier;
use emozion::catalog::EmotionCatalog;
use emozion::game::{AdvanceOutcome, CardId, MatchingEngine, RecognitionEngine, ResolveOutcome};
use emozion::stats::{PerformanceRecord, StatsManager};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

/// Deterministic RNG for reproducible boards
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a stats manager on a database in a fresh temp dir
///
/// Keep the returned `TempDir` alive for as long as the manager is used.
pub fn temp_stats() -> (TempDir, StatsManager) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let manager =
        StatsManager::with_path(&dir.path().join("stats.db")).expect("Failed to open stats db");
    (dir, manager)
}

/// Card ids grouped by emotion
pub fn card_pairs(engine: &MatchingEngine) -> Vec<(CardId, CardId)> {
    let mut by_emotion: HashMap<&str, Vec<CardId>> = HashMap::new();
    for card in engine.cards() {
        by_emotion.entry(card.emotion_id.as_str()).or_default().push(card.id);
    }
    let mut pairs: Vec<_> = by_emotion.values().map(|ids| (ids[0], ids[1])).collect();
    pairs.sort();
    pairs
}

/// Clears a board with one attempt per pair
pub fn play_matching_perfectly(engine: &mut MatchingEngine) -> PerformanceRecord {
    for (first, second) in card_pairs(engine) {
        engine.flip_card(first);
        engine.flip_card(second);
        if let ResolveOutcome::Completed(record) = engine.resolve_pending() {
            return record;
        }
    }
    panic!("Board was not cleared");
}

/// Answers every round; `correct(i)` decides round `i`
pub fn play_recognition(
    engine: &mut RecognitionEngine,
    correct: impl Fn(usize) -> bool,
) -> PerformanceRecord {
    let mut index = 0;
    loop {
        let round = engine.current_round().expect("No current round").clone();
        let answer = if correct(index) {
            round.target_name.clone()
        } else {
            round
                .options
                .iter()
                .find(|o| **o != round.target_name)
                .expect("No wrong option")
                .clone()
        };
        engine.submit_answer(&answer);
        if let AdvanceOutcome::Completed(record) = engine.advance() {
            return record;
        }
        index += 1;
    }
}

/// Plays a full session of a tier on the built-in catalog
pub fn finished_matching(tier: Tier, seed: u64) -> PerformanceRecord {
    let mut engine = MatchingEngine::start(tier, EmotionCatalog::builtin(), &mut seeded_rng(seed));
    play_matching_perfectly(&mut engine)
}

/// Plays a full quiz of a tier on the built-in catalog, all answers right
pub fn finished_recognition(tier: Tier, seed: u64) -> PerformanceRecord {
    let mut engine =
        RecognitionEngine::start(tier, EmotionCatalog::builtin(), &mut seeded_rng(seed));
    play_recognition(&mut engine, |_| true)
}
