//! Card-flip memory game
//!
//! Lifecycle: `Setup -> Playing -> Resolving -> Playing ... -> Completed`.
//! The second flip of a turn moves the engine to `Resolving`, where the match
//! result is already known but not applied. The caller shows both cards for as
//! long as it likes and then calls [`MatchingEngine::resolve_pending`].

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::SessionClock;
use crate::catalog::EmotionCatalog;
use crate::domain::{EmotionId, Tier};
use crate::stats::PerformanceRecord;

/// Unique identifier for a card on a board
pub type CardId = u32;

/// A single card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub emotion_id: EmotionId,
    /// Face up (pending or matched)
    pub flipped: bool,
    /// Part of a found pair, frozen from now on
    pub matched: bool,
}

/// Current phase of a matching session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchingPhase {
    /// Board not dealt yet
    Setup,
    /// Waiting for the first or second flip of a turn
    Playing,
    /// Two cards face up, waiting for the caller to resolve them
    Resolving {
        first: CardId,
        second: CardId,
        is_match: bool,
    },
    /// Every pair found
    Completed,
}

/// Result of a flip request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Not allowed in the current state, nothing changed
    Ignored,
    /// First card of a turn turned face up
    Flipped,
    /// Second card turned face up, the pair is now pending
    PairPending { is_match: bool },
}

/// Result of resolving a pending pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Nothing was pending
    Ignored,
    Matched,
    /// Both cards turned face down again
    Mismatched,
    /// The last pair was found; emitted exactly once per session
    Completed(PerformanceRecord),
}

/// State machine for one matching session
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    tier: Tier,
    phase: MatchingPhase,
    cards: Vec<Card>,
    /// First card of the current turn while in `Playing`
    first_pick: Option<CardId>,
    matched_pairs: u32,
    attempts: u32,
    total_pairs: u32,
    clock: Option<SessionClock>,
    completion: Option<PerformanceRecord>,
}

impl MatchingEngine {
    /// Create an engine in `Setup`
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            phase: MatchingPhase::Setup,
            cards: Vec::new(),
            first_pick: None,
            matched_pairs: 0,
            attempts: 0,
            total_pairs: 0,
            clock: None,
            completion: None,
        }
    }

    /// Create an engine and deal the board right away
    pub fn start<R: Rng + ?Sized>(tier: Tier, catalog: &EmotionCatalog, rng: &mut R) -> Self {
        let mut engine = Self::new(tier);
        engine.initialize(catalog, rng);
        engine
    }

    /// Deal two cards per tier emotion and shuffle them
    ///
    /// Only valid in `Setup`; returns `false` when ignored.
    pub fn initialize<R: Rng + ?Sized>(&mut self, catalog: &EmotionCatalog, rng: &mut R) -> bool {
        if self.phase != MatchingPhase::Setup {
            tracing::debug!("Matching board already dealt, ignoring initialize");
            return false;
        }

        let emotions = catalog.emotions_for_tier(self.tier);
        let mut cards = Vec::with_capacity(emotions.len() * 2);
        for (index, emotion) in emotions.iter().enumerate() {
            let base = (index * 2) as CardId;
            for id in [base, base + 1] {
                cards.push(Card {
                    id,
                    emotion_id: emotion.id.clone(),
                    flipped: false,
                    matched: false,
                });
            }
        }
        // Fisher-Yates
        cards.shuffle(rng);

        self.total_pairs = emotions.len() as u32;
        self.cards = cards;
        self.first_pick = None;
        self.matched_pairs = 0;
        self.attempts = 0;
        self.clock = Some(SessionClock::start());
        self.phase = MatchingPhase::Playing;

        tracing::debug!(
            "Dealt matching board: tier={}, pairs={}",
            self.tier,
            self.total_pairs
        );
        true
    }

    /// Turn a card face up
    pub fn flip_card(&mut self, card_id: CardId) -> FlipOutcome {
        if self.phase != MatchingPhase::Playing {
            tracing::debug!("Flip of card {} ignored in phase {:?}", card_id, self.phase);
            return FlipOutcome::Ignored;
        }

        let Some(card) = self.cards.iter_mut().find(|c| c.id == card_id) else {
            tracing::debug!("Flip of unknown card {} ignored", card_id);
            return FlipOutcome::Ignored;
        };
        if card.flipped || card.matched {
            return FlipOutcome::Ignored;
        }
        card.flipped = true;

        let Some(first) = self.first_pick.take() else {
            self.first_pick = Some(card_id);
            return FlipOutcome::Flipped;
        };

        self.attempts += 1;
        let is_match = self.emotion_of(first) == self.emotion_of(card_id);
        self.phase = MatchingPhase::Resolving {
            first,
            second: card_id,
            is_match,
        };
        FlipOutcome::PairPending { is_match }
    }

    /// Apply the pending pair comparison
    pub fn resolve_pending(&mut self) -> ResolveOutcome {
        let MatchingPhase::Resolving {
            first,
            second,
            is_match,
        } = self.phase
        else {
            return ResolveOutcome::Ignored;
        };

        for card in self.cards.iter_mut().filter(|c| c.id == first || c.id == second) {
            if is_match {
                card.matched = true;
            } else {
                card.flipped = false;
            }
        }

        if !is_match {
            self.phase = MatchingPhase::Playing;
            return ResolveOutcome::Mismatched;
        }

        self.matched_pairs += 1;
        if self.matched_pairs < self.total_pairs {
            self.phase = MatchingPhase::Playing;
            return ResolveOutcome::Matched;
        }

        let elapsed = self.clock.map(|c| c.elapsed_secs()).unwrap_or(0);
        let record = PerformanceRecord::matching(self.tier, self.attempts, self.total_pairs, elapsed);
        tracing::info!(
            "Matching session completed: tier={}, attempts={}, pairs={}, {}s",
            self.tier,
            self.attempts,
            self.total_pairs,
            elapsed
        );
        self.phase = MatchingPhase::Completed;
        self.completion = Some(record.clone());
        ResolveOutcome::Completed(record)
    }

    fn emotion_of(&self, card_id: CardId) -> Option<&str> {
        self.card(card_id).map(|c| c.emotion_id.as_str())
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn phase(&self) -> MatchingPhase {
        self.phase
    }

    /// Cards in board order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    /// Face-up cards that are not matched yet (0, 1 or 2)
    pub fn flipped_card_ids(&self) -> Vec<CardId> {
        match self.phase {
            MatchingPhase::Resolving { first, second, .. } => vec![first, second],
            _ => self.first_pick.into_iter().collect(),
        }
    }

    /// Match result of the pending pair, known as soon as the second card flips
    pub fn pending_is_match(&self) -> Option<bool> {
        match self.phase {
            MatchingPhase::Resolving { is_match, .. } => Some(is_match),
            _ => None,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    pub fn is_completed(&self) -> bool {
        self.phase == MatchingPhase::Completed
    }

    /// The completion record, once the board is cleared
    pub fn completion(&self) -> Option<&PerformanceRecord> {
        self.completion.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GameKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn engine(tier: Tier) -> MatchingEngine {
        let mut rng = StdRng::seed_from_u64(42);
        MatchingEngine::start(tier, EmotionCatalog::builtin(), &mut rng)
    }

    /// Card ids grouped by emotion, in board order
    fn pairs(engine: &MatchingEngine) -> Vec<(CardId, CardId)> {
        let mut by_emotion: HashMap<&str, Vec<CardId>> = HashMap::new();
        for card in engine.cards() {
            by_emotion.entry(card.emotion_id.as_str()).or_default().push(card.id);
        }
        let mut pairs: Vec<(CardId, CardId)> = by_emotion.values().map(|ids| (ids[0], ids[1])).collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn test_board_has_two_cards_per_emotion() {
        for tier in Tier::ALL {
            let engine = engine(tier);
            let expected = EmotionCatalog::builtin().emotions_for_tier(tier).len();
            assert_eq!(engine.cards().len(), expected * 2);
            assert_eq!(engine.total_pairs() as usize, expected);

            let mut counts: HashMap<&str, usize> = HashMap::new();
            for card in engine.cards() {
                *counts.entry(card.emotion_id.as_str()).or_default() += 1;
            }
            assert!(counts.values().all(|&n| n == 2));
            assert_eq!(engine.phase(), MatchingPhase::Playing);
        }
    }

    #[test]
    fn test_flip_ignored_before_initialize() {
        let mut engine = MatchingEngine::new(Tier::Easy);
        assert_eq!(engine.phase(), MatchingPhase::Setup);
        assert_eq!(engine.flip_card(0), FlipOutcome::Ignored);
        assert_eq!(engine.resolve_pending(), ResolveOutcome::Ignored);
    }

    #[test]
    fn test_initialize_only_once() {
        let mut engine = engine(Tier::Easy);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!engine.initialize(EmotionCatalog::builtin(), &mut rng));
    }

    #[test]
    fn test_same_card_twice_is_ignored() {
        let mut engine = engine(Tier::Easy);
        let id = engine.cards()[0].id;
        assert_eq!(engine.flip_card(id), FlipOutcome::Flipped);
        assert_eq!(engine.flip_card(id), FlipOutcome::Ignored);
        assert_eq!(engine.attempts(), 0);
        assert_eq!(engine.flipped_card_ids(), vec![id]);
    }

    #[test]
    fn test_unknown_card_is_ignored() {
        let mut engine = engine(Tier::Easy);
        assert_eq!(engine.flip_card(999), FlipOutcome::Ignored);
    }

    #[test]
    fn test_mismatch_turns_cards_back() {
        let mut engine = engine(Tier::Easy);
        let p = pairs(&engine);
        let (a, b) = (p[0].0, p[1].0);

        assert_eq!(engine.flip_card(a), FlipOutcome::Flipped);
        assert_eq!(engine.flip_card(b), FlipOutcome::PairPending { is_match: false });
        assert_eq!(engine.attempts(), 1);
        assert_eq!(engine.pending_is_match(), Some(false));

        // Third flip while resolving is rejected
        assert_eq!(engine.flip_card(p[2].0), FlipOutcome::Ignored);
        assert_eq!(engine.flipped_card_ids().len(), 2);

        assert_eq!(engine.resolve_pending(), ResolveOutcome::Mismatched);
        assert!(!engine.card(a).unwrap().flipped);
        assert!(!engine.card(b).unwrap().flipped);
        assert!(engine.flipped_card_ids().is_empty());
        assert_eq!(engine.phase(), MatchingPhase::Playing);
        assert_eq!(engine.resolve_pending(), ResolveOutcome::Ignored);
    }

    #[test]
    fn test_match_freezes_cards() {
        let mut engine = engine(Tier::Easy);
        let (a, b) = pairs(&engine)[0];

        engine.flip_card(a);
        assert_eq!(engine.flip_card(b), FlipOutcome::PairPending { is_match: true });
        assert_eq!(engine.resolve_pending(), ResolveOutcome::Matched);
        assert_eq!(engine.matched_pairs(), 1);

        let card = engine.card(a).unwrap();
        assert!(card.matched && card.flipped);
        assert_eq!(engine.flip_card(a), FlipOutcome::Ignored);
        assert_eq!(engine.flip_card(b), FlipOutcome::Ignored);
    }

    #[test]
    fn test_perfect_game_completes_once() {
        let mut engine = engine(Tier::Easy);
        let all = pairs(&engine);
        let mut completions = 0;

        for (a, b) in all {
            engine.flip_card(a);
            engine.flip_card(b);
            if let ResolveOutcome::Completed(record) = engine.resolve_pending() {
                completions += 1;
                assert_eq!(record.game_kind, GameKind::Matching);
                assert_eq!(record.attempts, Some(5));
                assert_eq!(record.matched_pairs, Some(5));
                assert_eq!(record.total_pairs, Some(5));
            }
        }

        assert_eq!(completions, 1);
        assert!(engine.is_completed());
        assert!(engine.completion().is_some());
        assert_eq!(engine.resolve_pending(), ResolveOutcome::Ignored);
        assert_eq!(engine.flip_card(0), FlipOutcome::Ignored);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = engine(Tier::Medium);
        let b = engine(Tier::Medium);
        assert_eq!(a.cards(), b.cards());
    }
}
