//! History command implementation

use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::Path;

use emozion::GameKind;
use emozion::stats::SessionRecord;

/// Show recent sessions followed by totals
pub fn history_command(db: Option<&Path>, limit: usize) -> Result<()> {
    let stats = super::open_stats(db)?;
    let query = stats.query();
    let sessions = query.recent_sessions(limit)?;

    if sessions.is_empty() {
        println!("No sessions played yet.");
        return Ok(());
    }

    println!("Recent sessions ({}):\n", sessions.len());
    for session in &sessions {
        println!("  {}", describe(session));
    }

    let summary = query.summary()?;
    println!();
    println!(
        "Total: {} sessions ({} matching, {} recognition), {} played",
        summary.total_sessions,
        summary.matching_sessions,
        summary.recognition_sessions,
        format_duration(summary.total_time_secs)
    );
    println!("Badges: {}", summary.badges_owned);

    if !summary.bests.is_empty() {
        println!("\nBest results:");
        for best in &summary.bests {
            println!(
                "  {:<12} {:<7} {}  ({} played)",
                best.game_kind.label(),
                best.tier.label(),
                super::stars(best.best_stars),
                best.sessions
            );
        }
    }

    Ok(())
}

fn describe(session: &SessionRecord) -> String {
    let record = &session.record;
    let when = DateTime::from_timestamp_millis(session.completed_at)
        .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "?".to_string());
    let result = match record.game_kind {
        GameKind::Matching => format!(
            "{} pairs, {} attempts",
            record.total_pairs.unwrap_or(0),
            record.attempts.unwrap_or(0)
        ),
        GameKind::Recognition => format!(
            "{}/{} correct, streak {}",
            record.score.unwrap_or(0),
            record.total_rounds.unwrap_or(0),
            record.max_streak.unwrap_or(0)
        ),
    };
    format!(
        "{}  {:<12} {:<7} {}  {} ({})",
        when,
        record.game_kind.label(),
        record.tier.label(),
        super::stars(session.star_rating),
        result,
        format_duration(record.time_spent_secs)
    )
}

fn format_duration(secs: u64) -> String {
    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3720), "1h 2m");
    }
}
