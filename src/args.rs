use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::model::structures::match_record::MatchOutcome;

#[derive(Parser, Clone, Debug)]
#[command(
    display_name = "Ladder Rating",
    author = "Ladder Rating",
    about = "Rank ladder and rating engine",
    long_about = "Estimates ratings, predicts counter deltas and simulates ladder progression for ranked players"
)]
pub struct Args {
    /// JSON snapshot exported by the ladder backend. Needed by the player-based commands.
    #[arg(short, long, env = "LADDER_SNAPSHOT", global = true, help = "Path to a player snapshot file")]
    pub snapshot: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        global = true,
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String,

    /// Shows progress bars for long projections
    #[arg(long, global = true, action = clap::ArgAction::SetTrue)]
    pub progress: bool,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Folds a player's match history into a rating estimate
    Estimate {
        #[arg(short, long)]
        player: String
    },

    /// Scores how far predictions from a player's history can be trusted
    Confidence {
        #[arg(short, long)]
        player: String
    },

    /// Predicts the delta of the opposite outcome from one observed result
    Predict {
        #[arg(long, allow_negative_numbers = true)]
        delta: i32,
        #[arg(long, value_enum)]
        outcome: DecisiveOutcome,
        #[arg(long)]
        rating: f64,
        /// Defaults to the configured k-factor
        #[arg(short, long)]
        k: Option<f64>
    },

    /// Checks an observed win delta and loss delta for mutual consistency
    Symmetry {
        #[arg(long)]
        win_delta: i32,
        #[arg(long, allow_negative_numbers = true)]
        loss_delta: i32,
        #[arg(long)]
        rating: f64,
        #[arg(short, long)]
        k: Option<f64>
    },

    /// Simulates one ladder trajectory for a player
    Simulate {
        #[arg(short, long)]
        player: String,
        #[arg(short, long, default_value_t = 20)]
        games: u32,
        /// Fixed outcome sequence such as "WWLW" (cycled). Sampled from the win rate when omitted.
        #[arg(long)]
        outcomes: Option<String>,
        #[arg(long, default_value_t = 0)]
        seed: u64
    },

    /// Projects many simulated trajectories for a player
    Project {
        #[arg(short, long)]
        player: String,
        #[arg(short, long, default_value_t = 20)]
        games: u32,
        #[arg(short, long, default_value_t = 1000)]
        trials: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64
    },

    /// Full report for a player: estimate, confidence, symmetry and projection
    Report {
        #[arg(short, long)]
        player: String,
        #[arg(short, long, default_value_t = 20)]
        games: u32,
        #[arg(short, long, default_value_t = 1000)]
        trials: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64
    },

    /// Ladder points separating two rank snapshots
    Lifetime {
        /// Rank label, e.g. "Gold 2"
        #[arg(long)]
        from: String,
        #[arg(long)]
        from_points: i32,
        #[arg(long)]
        to: String,
        #[arg(long)]
        to_points: i32
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisiveOutcome {
    Win,
    Loss
}

impl From<DecisiveOutcome> for MatchOutcome {
    fn from(value: DecisiveOutcome) -> Self {
        match value {
            DecisiveOutcome::Win => MatchOutcome::Win,
            DecisiveOutcome::Loss => MatchOutcome::Loss
        }
    }
}

/// Parses "WLLW"-style sequences; anything other than W/L (case-insensitive) is rejected.
pub fn parse_outcome_sequence(s: &str) -> Result<Vec<bool>, String> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_uppercase() {
            'W' => Ok(true),
            'L' => Ok(false),
            other => Err(format!("Unexpected outcome '{}', expected W or L", other))
        })
        .collect()
}
