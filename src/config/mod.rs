//! Configuration loading and management
//!
//! A single TOML file (`~/.emozion/config.toml` by default) holding the
//! player settings. Every field has a default, so partial or empty files load.

mod io;
mod settings;

pub use settings::{ColorBlindMode, GameSettings, Settings, Theme};

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Player settings
    #[serde(default)]
    pub settings: Settings,
}
