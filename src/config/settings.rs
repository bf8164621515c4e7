//! Settings configuration types

mod game;

pub use game::GameSettings;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::domain::Tier;

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Color palette adjustment for color vision deficiencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBlindMode {
    #[default]
    None,
    Protanopia,
    Deuteranopia,
    Tritanopia,
}

impl ColorBlindMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Some(ColorBlindMode::None),
            "protanopia" => Some(ColorBlindMode::Protanopia),
            "deuteranopia" => Some(ColorBlindMode::Deuteranopia),
            "tritanopia" => Some(ColorBlindMode::Tritanopia),
            _ => None,
        }
    }
}

/// Player-facing settings
///
/// Read-only for the games; only `emozion config set` writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub color_blind_mode: ColorBlindMode,

    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    /// Announce cards and answers in a screen-reader friendly way
    #[serde(default)]
    pub screen_reader_enabled: bool,

    #[serde(default = "default_true")]
    pub animations_enabled: bool,

    /// Game defaults
    #[serde(default)]
    pub game: GameSettings,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            color_blind_mode: ColorBlindMode::default(),
            sound_enabled: default_true(),
            screen_reader_enabled: false,
            animations_enabled: default_true(),
            game: GameSettings::default(),
        }
    }
}

impl Settings {
    /// Keys accepted by [`Settings::set`]
    pub const KEYS: &'static [&'static str] = &[
        "theme",
        "color_blind_mode",
        "sound_enabled",
        "screen_reader_enabled",
        "animations_enabled",
        "game.default_tier",
        "game.seed",
    ];

    /// Update one setting from its textual form
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "theme" => {
                self.theme = match Theme::from_str(value) {
                    Some(theme) => theme,
                    None => bail!("Unknown theme '{}' (expected light or dark)", value),
                }
            }
            "color_blind_mode" => {
                self.color_blind_mode = match ColorBlindMode::from_str(value) {
                    Some(mode) => mode,
                    None => bail!(
                        "Unknown color blind mode '{}' (expected none, protanopia, deuteranopia or tritanopia)",
                        value
                    ),
                }
            }
            "sound_enabled" => self.sound_enabled = parse_bool(key, value)?,
            "screen_reader_enabled" => self.screen_reader_enabled = parse_bool(key, value)?,
            "animations_enabled" => self.animations_enabled = parse_bool(key, value)?,
            "game.default_tier" => {
                self.game.default_tier = match Tier::from_str(value) {
                    Some(tier) => tier,
                    None => bail!("Unknown tier '{}' (expected easy, medium or hard)", value),
                }
            }
            "game.seed" => {
                self.game.seed = match value.trim() {
                    "" | "none" => None,
                    seed => Some(
                        seed.parse()
                            .map_err(|_| anyhow::anyhow!("Invalid seed '{}'", seed))?,
                    ),
                }
            }
            _ => bail!("Unknown setting '{}'. Known keys: {}", key, Self::KEYS.join(", ")),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => bail!("Invalid value '{}' for {} (expected true or false)", value, key),
    }
}
