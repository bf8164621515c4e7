//! Play command implementation
//!
//! Drives the game engines from stdin. Each line is one action; `q` (or end
//! of input) abandons the session without saving anything.

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use emozion::catalog::EmotionCatalog;
use emozion::config::{Config, Settings};
use emozion::game::{
    AdvanceOutcome, AnswerOutcome, FlipOutcome, MatchingEngine, MatchingPhase, QuizPhase,
    RecognitionEngine, ResolveOutcome,
};
use emozion::stats::{CompletionEvent, PerformanceRecord};
use emozion::{GameKind, Tier};

/// How long a mismatched pair stays visible when animations are on
const MISMATCH_PAUSE: Duration = Duration::from_millis(800);

pub struct PlayOptions {
    pub game: GameKind,
    pub tier: Option<String>,
    pub seed: Option<u64>,
    pub catalog: Option<PathBuf>,
}

/// Play one session and record it
pub fn play_command(config_path: &Path, db: Option<&Path>, options: PlayOptions) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let settings = &config.settings;

    let tier = options
        .tier
        .as_deref()
        .map(Tier::parse_lenient)
        .unwrap_or(settings.game.default_tier);

    let mut rng = match options.seed.or(settings.game.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let custom;
    let catalog = match &options.catalog {
        Some(path) => {
            custom = EmotionCatalog::from_file(path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
            &custom
        }
        None => EmotionCatalog::builtin(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let record = match options.game {
        GameKind::Matching => {
            let engine = MatchingEngine::start(tier, catalog, &mut rng);
            play_matching(engine, catalog, settings, &mut input, &mut out)?
        }
        GameKind::Recognition => {
            let engine = RecognitionEngine::start(tier, catalog, &mut rng);
            play_recognition(engine, settings, &mut input, &mut out)?
        }
    };

    let Some(record) = record else {
        println!("Session abandoned, nothing saved.");
        return Ok(());
    };

    let stats = super::open_stats(db)?;
    let event = stats.finish_session(record)?;
    print_summary(&event, &mut out)?;
    Ok(())
}

/// Run a matching board to completion
///
/// Returns `None` when the player quits.
fn play_matching<I: BufRead, O: Write>(
    mut engine: MatchingEngine,
    catalog: &EmotionCatalog,
    settings: &Settings,
    input: &mut I,
    out: &mut O,
) -> Result<Option<PerformanceRecord>> {
    if engine.phase() == MatchingPhase::Setup {
        bail!("No emotions available for tier {}", engine.tier());
    }

    writeln!(
        out,
        "Matching - {} ({} pairs). Pick two cards by number, q to quit.",
        engine.tier().label(),
        engine.total_pairs()
    )?;

    loop {
        render_board(&engine, catalog, settings, out)?;
        let Some(line) = prompt(input, out, "card")? else {
            return Ok(None);
        };

        let card_id = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| engine.cards().get(index))
            .map(|card| card.id);
        let Some(card_id) = card_id else {
            writeln!(out, "Enter a card number between 1 and {}", engine.cards().len())?;
            continue;
        };

        match engine.flip_card(card_id) {
            FlipOutcome::Ignored => writeln!(out, "That card is already face up.")?,
            FlipOutcome::Flipped => {}
            FlipOutcome::PairPending { is_match } => {
                render_board(&engine, catalog, settings, out)?;
                if is_match {
                    writeln!(out, "It's a match!")?;
                    bell(settings, out)?;
                } else {
                    writeln!(out, "Not a match, try again.")?;
                    if settings.animations_enabled {
                        out.flush()?;
                        std::thread::sleep(MISMATCH_PAUSE);
                    }
                }

                if let ResolveOutcome::Completed(record) = engine.resolve_pending() {
                    return Ok(Some(record));
                }
            }
        }
    }
}

fn render_board<O: Write>(
    engine: &MatchingEngine,
    catalog: &EmotionCatalog,
    settings: &Settings,
    out: &mut O,
) -> Result<()> {
    let label = |emotion_id: &str| {
        catalog
            .get(emotion_id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| emotion_id.to_string())
    };

    writeln!(out)?;
    if settings.screen_reader_enabled {
        for (index, card) in engine.cards().iter().enumerate() {
            let state = if card.matched {
                format!("matched, {}", label(&card.emotion_id))
            } else if card.flipped {
                format!("face up, {}", label(&card.emotion_id))
            } else {
                "face down".to_string()
            };
            writeln!(out, "Card {}: {}", index + 1, state)?;
        }
    } else {
        let columns = if engine.cards().len() > 20 { 6 } else { 5 };
        for (row, chunk) in engine.cards().chunks(columns).enumerate() {
            let cells: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(col, card)| {
                    let face = if card.flipped || card.matched {
                        label(&card.emotion_id)
                    } else {
                        "??".to_string()
                    };
                    format!("{:>2}:{:<12}", row * columns + col + 1, face)
                })
                .collect();
            writeln!(out, "{}", cells.join(" ").trim_end())?;
        }
    }
    writeln!(
        out,
        "Pairs {}/{}  Attempts {}",
        engine.matched_pairs(),
        engine.total_pairs(),
        engine.attempts()
    )?;
    Ok(())
}

/// Run a quiz to completion
///
/// Answers are given by option number or by name. Returns `None` when the
/// player quits.
fn play_recognition<I: BufRead, O: Write>(
    mut engine: RecognitionEngine,
    settings: &Settings,
    input: &mut I,
    out: &mut O,
) -> Result<Option<PerformanceRecord>> {
    if engine.phase() == QuizPhase::Setup {
        bail!("No emotions available for tier {}", engine.tier());
    }

    writeln!(
        out,
        "Recognition - {} ({} rounds). Answer by number or name, q to quit.",
        engine.tier().label(),
        engine.total_rounds()
    )?;

    loop {
        let Some(round) = engine.current_round().cloned() else {
            bail!("Quiz has no current round");
        };

        writeln!(out)?;
        writeln!(
            out,
            "Round {}/{}: how does this face feel? [{}]",
            engine.current_round_index() + 1,
            engine.total_rounds(),
            round.image_path
        )?;
        for (index, option) in round.options.iter().enumerate() {
            writeln!(out, "  {}. {}", index + 1, option)?;
        }

        let Some(line) = prompt(input, out, "answer")? else {
            return Ok(None);
        };
        let answer = match line.parse::<usize>() {
            Ok(n) if (1..=round.options.len()).contains(&n) => round.options[n - 1].clone(),
            _ => match round.options.iter().find(|o| o.eq_ignore_ascii_case(&line)) {
                Some(option) => option.clone(),
                None => {
                    writeln!(out, "Pick one of the {} options.", round.options.len())?;
                    continue;
                }
            },
        };

        match engine.submit_answer(&answer) {
            AnswerOutcome::Correct => {
                writeln!(out, "Correct! Streak: {}", engine.streak())?;
                bell(settings, out)?;
            }
            AnswerOutcome::Incorrect { expected } => {
                writeln!(out, "Not quite, this face is {}.", expected)?;
            }
            AnswerOutcome::Ignored => continue,
        }

        if let AdvanceOutcome::Completed(record) = engine.advance() {
            return Ok(Some(record));
        }
    }
}

/// Read one trimmed line; `None` on end of input or `q`
fn prompt<I: BufRead, O: Write>(input: &mut I, out: &mut O, label: &str) -> Result<Option<String>> {
    write!(out, "{}> ", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Ok(None);
    }
    Ok(Some(line.to_string()))
}

fn bell<O: Write>(settings: &Settings, out: &mut O) -> Result<()> {
    if settings.sound_enabled {
        write!(out, "\x07")?;
    }
    Ok(())
}

fn print_summary<O: Write>(event: &CompletionEvent, out: &mut O) -> Result<()> {
    let record = &event.record;
    writeln!(out)?;
    writeln!(
        out,
        "{} ({}) finished in {}s",
        event.game_kind.label(),
        event.tier.label(),
        record.time_spent_secs
    )?;
    match event.game_kind {
        GameKind::Matching => writeln!(
            out,
            "  {} pairs in {} attempts",
            record.total_pairs.unwrap_or(0),
            record.attempts.unwrap_or(0)
        )?,
        GameKind::Recognition => writeln!(
            out,
            "  {}/{} correct, best streak {}",
            record.score.unwrap_or(0),
            record.total_rounds.unwrap_or(0),
            record.max_streak.unwrap_or(0)
        )?,
    }
    writeln!(out, "  {}", super::stars(event.star_rating))?;

    for badge in &event.newly_earned {
        writeln!(out, "  New badge: {} {} - {}", badge.icon, badge.name, badge.description)?;
    }
    Ok(())
}
