use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use emozion::GameKind;

mod cli;

#[derive(Parser)]
#[command(name = "emozion")]
#[command(about = "Emotion recognition games - match faces and name feelings")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.emozion/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the stats database (defaults to ~/.emozion/stats.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play {
        /// Which game: matching or recognition
        #[arg(value_parser = parse_game_kind)]
        game: GameKind,

        /// Difficulty tier: easy, medium or hard (defaults to the configured tier)
        #[arg(short, long)]
        tier: Option<String>,

        /// RNG seed for a reproducible board
        #[arg(short, long)]
        seed: Option<u64>,

        /// Load emotions from a JSON catalog instead of the built-in set
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show every badge and which ones are unlocked
    Badges,

    /// Show recent sessions and totals
    History {
        /// Number of sessions to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the current settings
    Show,

    /// Change one setting, e.g. `config set game.default_tier medium`
    Set { key: String, value: String },
}

fn parse_game_kind(s: &str) -> std::result::Result<GameKind, String> {
    GameKind::from_str(s).ok_or_else(|| format!("unknown game '{}' (expected matching or recognition)", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli
        .config
        .unwrap_or_else(emozion::config::Config::global_config_path);

    match cli.command {
        Commands::Play {
            game,
            tier,
            seed,
            catalog,
        } => {
            let options = cli::play::PlayOptions {
                game,
                tier,
                seed,
                catalog,
            };
            cli::play::play_command(&config_path, cli.db.as_deref(), options)?;
        }
        Commands::Badges => {
            cli::badges::badges_command(cli.db.as_deref())?;
        }
        Commands::History { limit } => {
            cli::history::history_command(cli.db.as_deref(), limit)?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => cli::config::config_init_command(&config_path, force)?,
            ConfigCommands::Show => cli::config::config_show_command(&config_path)?,
            ConfigCommands::Set { key, value } => {
                cli::config::config_set_command(&config_path, &key, &value)?
            }
        },
    }

    Ok(())
}
