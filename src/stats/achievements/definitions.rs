//! Badge definitions and metadata
//!
//! All badges are defined here. The catalog is static; which badges a player
//! owns lives in the stats database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for each badge
///
/// Declaration order matches [`BADGES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeId {
    GoldStar,
    SilverStar,
    #[serde(rename = "streak-5")]
    Streak5,
    #[serde(rename = "streak-10")]
    Streak10,
    EmotionMaster,
    FirstSession,
    Persistent,
    MemoryExpert,
    RecognitionPro,
}

impl BadgeId {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoldStar => "gold-star",
            Self::SilverStar => "silver-star",
            Self::Streak5 => "streak-5",
            Self::Streak10 => "streak-10",
            Self::EmotionMaster => "emotion-master",
            Self::FirstSession => "first-session",
            Self::Persistent => "persistent",
            Self::MemoryExpert => "memory-expert",
            Self::RecognitionPro => "recognition-pro",
        }
    }

    /// Parse from database string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "gold-star" => Some(Self::GoldStar),
            "silver-star" => Some(Self::SilverStar),
            "streak-5" => Some(Self::Streak5),
            "streak-10" => Some(Self::Streak10),
            "emotion-master" => Some(Self::EmotionMaster),
            "first-session" => Some(Self::FirstSession),
            "persistent" => Some(Self::Persistent),
            "memory-expert" => Some(Self::MemoryExpert),
            "recognition-pro" => Some(Self::RecognitionPro),
            _ => None,
        }
    }

    /// Get all badge IDs
    pub fn all() -> &'static [BadgeId] {
        &[
            Self::GoldStar,
            Self::SilverStar,
            Self::Streak5,
            Self::Streak10,
            Self::EmotionMaster,
            Self::FirstSession,
            Self::Persistent,
            Self::MemoryExpert,
            Self::RecognitionPro,
        ]
    }
}

impl std::fmt::Display for BadgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Badge definition with all metadata
#[derive(Debug, Clone)]
pub struct BadgeDefinition {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub image_url: &'static str,
}

/// All badge definitions, in [`BadgeId`] order
pub static BADGES: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: BadgeId::GoldStar,
        name: "Gold Star",
        description: "Finish a level without mistakes",
        icon: "🌟",
        image_url: "/badges/gold-star.png",
    },
    BadgeDefinition {
        id: BadgeId::SilverStar,
        name: "Silver Star",
        description: "Finish a level with only a few mistakes",
        icon: "⭐",
        image_url: "/badges/silver-star.png",
    },
    BadgeDefinition {
        id: BadgeId::Streak5,
        name: "Streak of 5",
        description: "Get 5 answers right in a row",
        icon: "🔥",
        image_url: "/badges/streak-5.png",
    },
    BadgeDefinition {
        id: BadgeId::Streak10,
        name: "Streak of 10",
        description: "Get 10 answers right in a row",
        icon: "💥",
        image_url: "/badges/streak-10.png",
    },
    BadgeDefinition {
        id: BadgeId::EmotionMaster,
        name: "Emotion Master",
        description: "Finish every level of one game",
        icon: "🏆",
        image_url: "/badges/emotion-master.png",
    },
    BadgeDefinition {
        id: BadgeId::FirstSession,
        name: "Explorer",
        description: "Finish your first level",
        icon: "🧭",
        image_url: "/badges/explorer.png",
    },
    BadgeDefinition {
        id: BadgeId::Persistent,
        name: "Persistent",
        description: "Finish a hard level",
        icon: "💪",
        image_url: "/badges/persistent.png",
    },
    BadgeDefinition {
        id: BadgeId::MemoryExpert,
        name: "Memory Expert",
        description: "Finish a matching game with few attempts",
        icon: "🧠",
        image_url: "/badges/memory-expert.png",
    },
    BadgeDefinition {
        id: BadgeId::RecognitionPro,
        name: "Recognition Pro",
        description: "Finish a recognition game with a perfect streak",
        icon: "🎯",
        image_url: "/badges/recognition-pro.png",
    },
];

impl BadgeDefinition {
    /// Get badge definition by ID
    pub fn get(id: BadgeId) -> &'static BadgeDefinition {
        &BADGES[id as usize]
    }

    /// Get total number of badges
    pub fn total_count() -> usize {
        BADGES.len()
    }

    /// Unearned badge built from this definition
    pub fn to_badge(&self) -> Badge {
        Badge {
            id: self.id,
            name: self.name.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            image_url: self.image_url.to_string(),
            earned: false,
            earned_at: None,
        }
    }
}

/// A badge as shown to the player and persisted with its unlock time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub image_url: String,
    pub earned: bool,
    /// Set by the store on first insertion
    pub earned_at: Option<DateTime<Utc>>,
}

impl Badge {
    /// Badge marked as earned, not yet timestamped
    pub fn earned(id: BadgeId) -> Self {
        Badge {
            earned: true,
            ..BadgeDefinition::get(id).to_badge()
        }
    }

    /// Badge marked as earned at a known time
    pub fn earned_at(id: BadgeId, at: DateTime<Utc>) -> Self {
        Badge {
            earned_at: Some(at),
            ..Self::earned(id)
        }
    }
}
