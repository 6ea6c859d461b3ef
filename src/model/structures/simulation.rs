use serde::{Deserialize, Serialize};

use crate::model::structures::rank_position::RankPosition;

/// Inputs to a progression run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    pub rating: f64,
    pub start: RankPosition,
    pub win_rate: f64,
    pub avg_win_delta: f64,
    pub avg_loss_delta: f64,
    pub games: u32
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStep {
    /// 1-based
    pub game_index: u32,
    pub won: bool,
    /// Clamped to 0..=99 for reporting
    pub display_points: i32,
    pub rank_position: RankPosition,
    pub rating: i64,
    pub point_delta: i32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub steps: Vec<SimulationStep>,
    pub promotions: u32,
    pub demotions: u32,
    pub wins: u32,
    pub losses: u32,
    pub final_position: RankPosition,
    pub final_rating: f64
}

impl SimulationResult {
    pub fn net_ladder_change(&self, start: &RankPosition) -> i32 {
        self.final_position.ladder_index as i32 - start.ladder_index as i32
    }
}

/// Aggregate over many independent seeded runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub trials: u32,
    pub mean_final_rating: f64,
    pub mean_promotions: f64,
    pub mean_demotions: f64,
    /// Share of trials that finished on a higher rung than they started
    pub promotion_probability: f64,
    /// Share of trials that finished on a lower rung than they started
    pub demotion_probability: f64,
    /// Trial count per final ladder index, 0..=20
    pub final_index_histogram: Vec<u32>
}
