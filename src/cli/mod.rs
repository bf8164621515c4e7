//! CLI command implementations

pub mod badges;
pub mod config;
pub mod history;
pub mod play;

use anyhow::Result;
use std::path::Path;

use emozion::stats::StatsManager;

/// Open the stats database at `--db`, or the default location
fn open_stats(db: Option<&Path>) -> Result<StatsManager> {
    match db {
        Some(path) => StatsManager::with_path(path),
        None => StatsManager::new(),
    }
}

/// Render a star rating as filled and empty stars
fn stars(rating: u8) -> String {
    let filled = rating.min(3) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(3 - filled))
}
