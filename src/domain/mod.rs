//! Core domain types for Emozion

mod emotion;
mod game_kind;
mod tier;

pub use emotion::{Emotion, EmotionId};
pub use game_kind::GameKind;
pub use tier::Tier;
