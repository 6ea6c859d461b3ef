use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;
use tracing::info;

use crate::model::{
    error::ValidationError,
    structures::{match_record::MatchRecord, rank_position::RankPosition}
};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No snapshot for player {0}")]
    UnknownPlayer(String),

    #[error("Invalid snapshot: {0}")]
    Invalid(#[from] ValidationError)
}

/// A player's rank as reported by the ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentRank {
    pub position: RankPosition,
    pub is_new_season: bool,
    pub previous_rating: Option<f64>
}

/// Supplies a player's ordered match history, oldest first
pub trait MatchHistoryProvider {
    fn match_history(&self, player: &str) -> Result<Vec<MatchRecord>, ProviderError>;
}

/// Supplies a player's current rank and season context
pub trait RankProvider {
    fn current_rank(&self, player: &str) -> Result<CurrentRank, ProviderError>;
}

/// One player's entry in a snapshot file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub player: String,
    /// Rank label, e.g. "Gold 2" or "Nightmare"
    pub rank: String,
    pub points: i32,
    #[serde(default)]
    pub is_new_season: bool,
    #[serde(default)]
    pub previous_rating: Option<f64>,
    #[serde(default)]
    pub history: Vec<MatchRecord>
}

/// JSON export of ladder data for one or more players
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub players: Vec<PlayerSnapshot>
}

impl SnapshotFile {
    pub fn load(path: &Path) -> Result<SnapshotFile, ProviderError> {
        let contents = fs::read_to_string(path)?;
        let snapshot = SnapshotFile::from_json(&contents)?;

        info!("Loaded {} player snapshot(s) from {}", snapshot.players.len(), path.display());
        Ok(snapshot)
    }

    pub fn from_json(json: &str) -> Result<SnapshotFile, ProviderError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn player(&self, player: &str) -> Result<&PlayerSnapshot, ProviderError> {
        self.players
            .iter()
            .find(|p| p.player == player)
            .ok_or_else(|| ProviderError::UnknownPlayer(player.to_string()))
    }
}

impl MatchHistoryProvider for SnapshotFile {
    fn match_history(&self, player: &str) -> Result<Vec<MatchRecord>, ProviderError> {
        let snapshot = self.player(player)?;
        for record in &snapshot.history {
            record.validate()?;
        }

        Ok(snapshot.history.clone())
    }
}

impl RankProvider for SnapshotFile {
    fn current_rank(&self, player: &str) -> Result<CurrentRank, ProviderError> {
        let snapshot = self.player(player)?;

        Ok(CurrentRank {
            position: RankPosition::from_label(&snapshot.rank, snapshot.points)?,
            is_new_season: snapshot.is_new_season,
            previous_rating: snapshot.previous_rating
        })
    }
}
