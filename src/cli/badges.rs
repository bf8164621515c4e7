//! Badges command implementation

use anyhow::Result;
use std::path::Path;

/// Show the whole badge collection
pub fn badges_command(db: Option<&Path>) -> Result<()> {
    let stats = super::open_stats(db)?;
    let collection = stats.badges().collection()?;
    let owned = collection.iter().filter(|b| b.earned).count();

    println!("Badges ({}/{}):\n", owned, collection.len());

    for badge in &collection {
        if badge.earned {
            let when = badge
                .earned_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            println!("  {} {:<18} {}", badge.icon, badge.name, when);
        } else {
            println!("  ·  {:<18} locked", badge.name);
        }
        println!("     {}", badge.description);
    }

    Ok(())
}
