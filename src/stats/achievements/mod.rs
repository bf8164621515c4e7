//! Badges: definitions, unlock rules and the owned-badge store

mod checker;
mod definitions;
mod manager;

pub use checker::{check_mastery, evaluate};
pub use definitions::{BADGES, Badge, BadgeDefinition, BadgeId};
pub use manager::BadgeManager;
