//! Reference catalog of emotions
//!
//! The catalog is read-only reference data shared by both game engines. It is
//! validated once when it is built, so the engines can assume there are always
//! enough emotions to fill a four-option quiz round at every tier.

mod builtin;

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::{Emotion, Tier};

/// Smallest catalog that can produce a round of four distinct options
pub const MIN_CATALOG_SIZE: usize = 4;

static BUILTIN: Lazy<EmotionCatalog> = Lazy::new(|| EmotionCatalog {
    emotions: builtin::builtin_emotions(),
});

/// Error type for catalog loading
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Catalog JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Catalog has {found} emotions, at least {min} are required", min = MIN_CATALOG_SIZE)]
    TooSmall { found: usize },

    #[error("Duplicate emotion id: {0}")]
    DuplicateId(String),

    #[error("Duplicate emotion name: {0}")]
    DuplicateName(String),

    #[error("No emotions available for tier '{0}'")]
    EmptyTier(Tier),
}

/// Immutable, ordered list of emotions tagged by tier
#[derive(Debug, Clone)]
pub struct EmotionCatalog {
    emotions: Vec<Emotion>,
}

impl EmotionCatalog {
    /// Build a catalog, rejecting configurations the games cannot play
    pub fn new(emotions: Vec<Emotion>) -> Result<Self, CatalogError> {
        validate(&emotions)?;
        tracing::debug!("Loaded emotion catalog with {} entries", emotions.len());
        Ok(Self { emotions })
    }

    /// The catalog shipped with the game
    pub fn builtin() -> &'static EmotionCatalog {
        &BUILTIN
    }

    /// Parse a catalog from a JSON array of emotions
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let emotions: Vec<Emotion> = serde_json::from_str(content)?;
        Self::new(emotions)
    }

    /// Load a catalog from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// All emotions in definition order
    pub fn emotions(&self) -> &[Emotion] {
        &self.emotions
    }

    pub fn len(&self) -> usize {
        self.emotions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty()
    }

    /// Get emotion by ID
    pub fn get(&self, id: &str) -> Option<&Emotion> {
        self.emotions.iter().find(|e| e.id == id)
    }

    /// All emotions of a tier, in catalog order
    pub fn emotions_for_tier(&self, tier: Tier) -> Vec<&Emotion> {
        self.emotions.iter().filter(|e| e.in_tier(tier)).collect()
    }

    /// Uniform sample without replacement from every emotion except `exclude_id`
    ///
    /// Returns fewer than `count` emotions when the catalog is too small.
    pub fn sample_distractors<R: Rng + ?Sized>(
        &self,
        exclude_id: &str,
        count: usize,
        rng: &mut R,
    ) -> Vec<&Emotion> {
        let candidates: Vec<&Emotion> = self.emotions.iter().filter(|e| e.id != exclude_id).collect();
        candidates.choose_multiple(rng, count).copied().collect()
    }

    /// Uniform sample without replacement of `min(count, available)` tier emotions
    pub fn random_tier_subset<R: Rng + ?Sized>(
        &self,
        tier: Tier,
        count: usize,
        rng: &mut R,
    ) -> Vec<&Emotion> {
        let available = self.emotions_for_tier(tier);
        available.choose_multiple(rng, count).copied().collect()
    }
}

fn validate(emotions: &[Emotion]) -> Result<(), CatalogError> {
    if emotions.len() < MIN_CATALOG_SIZE {
        return Err(CatalogError::TooSmall {
            found: emotions.len(),
        });
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for emotion in emotions {
        if !ids.insert(emotion.id.as_str()) {
            return Err(CatalogError::DuplicateId(emotion.id.clone()));
        }
        // Names double as quiz answers
        if !names.insert(emotion.name.as_str()) {
            return Err(CatalogError::DuplicateName(emotion.name.clone()));
        }
    }

    for tier in Tier::ALL {
        if !emotions.iter().any(|e| e.in_tier(tier)) {
            return Err(CatalogError::EmptyTier(tier));
        }
    }

    Ok(())
}
