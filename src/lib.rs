//! Emozion - emotion recognition games
//!
//! Two small games that help children practise naming emotions from facial
//! expressions:
//!
//! 1. **Matching**: a card-flip memory board with one pair per emotion.
//! 2. **Recognition**: a quiz showing one face and four names to pick from.
//!
//! Both games come in three tiers (easy, medium, hard) that control how many
//! emotions are in play. Finished sessions are rated with stars and can unlock
//! badges, which are stored locally together with the session history.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod game;
pub mod stats;

pub use domain::*;
