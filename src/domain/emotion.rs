use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Tier;

/// Unique identifier for an emotion (e.g. "happy")
pub type EmotionId = String;

/// An emotion that can appear on a card or as a quiz target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emotion {
    /// Stable identifier, used to pair cards
    pub id: EmotionId,

    /// Display name, also the correct quiz answer
    pub name: String,

    /// Path of the face illustration
    pub image_path: String,

    /// Tiers this emotion takes part in
    pub tiers: BTreeSet<Tier>,
}

impl Emotion {
    pub fn new(id: &str, name: &str, image_path: &str, tiers: &[Tier]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            image_path: image_path.to_string(),
            tiers: tiers.iter().copied().collect(),
        }
    }

    /// Check whether the emotion belongs to a tier
    pub fn in_tier(&self, tier: Tier) -> bool {
        self.tiers.contains(&tier)
    }
}
