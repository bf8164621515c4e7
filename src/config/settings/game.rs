//! Game defaults

use serde::{Deserialize, Serialize};

use crate::domain::Tier;

/// Defaults applied when `emozion play` is run without flags
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSettings {
    /// Tier used when `--tier` is omitted. Unknown names load as easy.
    #[serde(default)]
    pub default_tier: Tier,

    /// Fixed RNG seed for reproducible boards (entropy when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}
