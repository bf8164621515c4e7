//! The emotion set shipped with the game
//!
//! Five basic emotions for every tier, five intermediate ones from Medium up
//! and five complex ones reserved for Hard.

use crate::domain::{Emotion, Tier};

const ALL_TIERS: &[Tier] = &[Tier::Easy, Tier::Medium, Tier::Hard];
const MEDIUM_UP: &[Tier] = &[Tier::Medium, Tier::Hard];
const HARD_ONLY: &[Tier] = &[Tier::Hard];

/// (id, display name, tiers)
const EMOTIONS: &[(&str, &str, &[Tier])] = &[
    // Basic
    ("happy", "Happy", ALL_TIERS),
    ("sad", "Sad", ALL_TIERS),
    ("angry", "Angry", ALL_TIERS),
    ("scared", "Scared", ALL_TIERS),
    ("surprised", "Surprised", ALL_TIERS),
    // Intermediate
    ("tired", "Tired", MEDIUM_UP),
    ("confused", "Confused", MEDIUM_UP),
    ("bored", "Bored", MEDIUM_UP),
    ("excited", "Excited", MEDIUM_UP),
    ("proud", "Proud", MEDIUM_UP),
    // Complex
    ("embarrassed", "Embarrassed", HARD_ONLY),
    ("frustrated", "Frustrated", HARD_ONLY),
    ("jealous", "Jealous", HARD_ONLY),
    ("calm", "Calm", HARD_ONLY),
    ("nervous", "Nervous", HARD_ONLY),
];

pub(super) fn builtin_emotions() -> Vec<Emotion> {
    EMOTIONS
        .iter()
        .map(|(id, name, tiers)| Emotion::new(id, name, &format!("/emotions/{id}.svg"), tiers))
        .collect()
}
