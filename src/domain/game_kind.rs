use serde::{Deserialize, Serialize};

/// Which mini-game a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// Card-flip memory game
    Matching,
    /// Multiple-choice quiz
    Recognition,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Matching, GameKind::Recognition];

    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Matching => "matching",
            GameKind::Recognition => "recognition",
        }
    }

    /// Parse from database string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "matching" => Some(GameKind::Matching),
            "recognition" => Some(GameKind::Recognition),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameKind::Matching => "Matching",
            GameKind::Recognition => "Recognition",
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
