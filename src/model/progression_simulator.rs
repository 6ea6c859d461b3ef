use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    config::EngineConfig,
    model::{
        constants::{LADDER_SIZE, MAX_AVERAGE_DELTA, MAX_SIMULATION_GAMES},
        error::ValidationError,
        ladder::{advance_one_step, baseline_rating},
        structures::{
            rank_position::RankPosition,
            simulation::{ProjectionSummary, SimulationParams, SimulationResult, SimulationStep}
        }
    },
    utils::progress_utils::progress_bar
};

/// Supplies the won/lost draw for each simulated game
pub trait OutcomeSource {
    fn next_won(&mut self, win_rate: f64) -> bool;
}

/// Samples each game independently with probability `win_rate`
pub struct BernoulliOutcomes<R: Rng> {
    rng: R
}

impl<R: Rng> BernoulliOutcomes<R> {
    pub fn new(rng: R) -> Self {
        BernoulliOutcomes { rng }
    }
}

impl BernoulliOutcomes<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        BernoulliOutcomes::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> OutcomeSource for BernoulliOutcomes<R> {
    fn next_won(&mut self, win_rate: f64) -> bool {
        self.rng.random_bool(win_rate)
    }
}

/// Replays a fixed outcome sequence, cycling when it runs out. Ignores `win_rate`.
/// An empty sequence loses every game.
pub struct FixedOutcomes {
    outcomes: Vec<bool>,
    cursor: usize
}

impl FixedOutcomes {
    pub fn new(outcomes: Vec<bool>) -> Self {
        FixedOutcomes { outcomes, cursor: 0 }
    }
}

impl OutcomeSource for FixedOutcomes {
    fn next_won(&mut self, _win_rate: f64) -> bool {
        if self.outcomes.is_empty() {
            return false;
        }

        let won = self.outcomes[self.cursor % self.outcomes.len()];
        self.cursor += 1;
        won
    }
}

pub struct ProgressionSimulator {
    pub config: EngineConfig
}

impl Default for ProgressionSimulator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ProgressionSimulator {
    pub fn new(config: EngineConfig) -> ProgressionSimulator {
        ProgressionSimulator { config }
    }

    /// Game cap in force. Configuration may lower the hard limit of 100 but never raise it.
    pub fn max_games(&self) -> u32 {
        self.config.max_simulation_games.min(MAX_SIMULATION_GAMES)
    }

    pub fn validate(&self, params: &SimulationParams) -> Result<(), ValidationError> {
        let max = self.max_games();
        if params.games == 0 || params.games > max {
            return Err(ValidationError::GameCountOutOfRange {
                games: params.games,
                max
            });
        }

        if !(0.0..=1.0).contains(&params.win_rate) {
            return Err(ValidationError::WinRateOutOfRange(params.win_rate));
        }

        let win_ok = params.avg_win_delta > 0.0 && params.avg_win_delta <= MAX_AVERAGE_DELTA;
        let loss_ok = params.avg_loss_delta < 0.0 && params.avg_loss_delta >= -MAX_AVERAGE_DELTA;
        if !(win_ok && loss_ok) {
            return Err(ValidationError::InvalidAverageDeltas {
                win: params.avg_win_delta,
                loss: params.avg_loss_delta
            });
        }

        RankPosition::new(params.start.ladder_index, params.start.display_points)?;

        Ok(())
    }

    /// Scales a raw per-game delta by the distance between the rating and the flat baseline of
    /// the current rung. Wins above the baseline and losses below it shrink, never below a
    /// magnitude of 1.
    pub fn scaled_delta(&self, won: bool, raw_delta: f64, rating: f64, ladder_index: u8) -> i32 {
        let baseline = baseline_rating(ladder_index);
        let divisor = self.config.diminishing_divisor;
        let floor = self.config.diminishing_floor;

        if won && rating > baseline {
            let factor = (1.0 - (rating - baseline) / divisor).max(floor);
            ((raw_delta * factor).round() as i32).max(1)
        } else if !won && rating < baseline {
            let factor = (1.0 - (baseline - rating) / divisor).max(floor);
            ((raw_delta * factor).round() as i32).min(-1)
        } else {
            raw_delta.round() as i32
        }
    }

    /// # Ladder progression
    ///
    /// Plays `params.games` games. Each game draws an outcome from `source`, scales the
    /// average delta for that outcome, moves at most one rung, then nudges the rating by
    /// `k * (score - 0.5)` as if every matchup were even.
    pub fn simulate_progression<S: OutcomeSource>(
        &self,
        params: &SimulationParams,
        source: &mut S
    ) -> Result<SimulationResult, ValidationError> {
        self.validate(params)?;

        let mut position = params.start;
        let mut rating = params.rating;
        let mut steps = Vec::with_capacity(params.games as usize);
        let mut promotions = 0;
        let mut demotions = 0;
        let mut wins = 0;

        for game_index in 1..=params.games {
            let won = source.next_won(params.win_rate);
            let raw_delta = if won {
                params.avg_win_delta
            } else {
                params.avg_loss_delta
            };
            let delta = self.scaled_delta(won, raw_delta, rating, position.ladder_index);

            let ladder_move = advance_one_step(position, delta);
            position = ladder_move.position;
            if ladder_move.promoted {
                promotions += 1;
            }
            if ladder_move.demoted {
                demotions += 1;
            }
            if won {
                wins += 1;
            }

            let score = if won { 1.0 } else { 0.0 };
            rating += self.config.k_factor * (score - 0.5);

            debug!(game_index, won, delta, %position, rating, "Simulated game");

            steps.push(SimulationStep {
                game_index,
                won,
                display_points: position.reported_points(),
                rank_position: position,
                rating: rating.round() as i64,
                point_delta: delta
            });
        }

        Ok(SimulationResult {
            steps,
            promotions,
            demotions,
            wins,
            losses: params.games - wins,
            final_position: position,
            final_rating: rating
        })
    }

    /// Runs `trials` independent Bernoulli simulations in parallel. Trial `i` is seeded with
    /// `seed + i`, so a projection is reproducible for a given seed.
    pub fn project_progression(
        &self,
        params: &SimulationParams,
        trials: u32,
        seed: u64,
        show_progress: bool
    ) -> Result<ProjectionSummary, ValidationError> {
        self.validate(params)?;
        if trials == 0 {
            return Err(ValidationError::NoTrials);
        }

        info!(trials, seed, games = params.games, "Projecting ladder progression");
        let bar = show_progress.then(|| progress_bar(trials as u64, "Simulating trials".to_string()));

        let results = (0..trials)
            .into_par_iter()
            .map(|trial| {
                let mut source = BernoulliOutcomes::seeded(seed.wrapping_add(trial as u64));
                let result = self.simulate_progression(params, &mut source);

                if let Some(bar) = &bar {
                    bar.inc(1);
                }

                result
            })
            .collect::<Result<Vec<SimulationResult>, ValidationError>>()?;

        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }

        Ok(summarize(&params.start, &results))
    }
}

fn summarize(start: &RankPosition, results: &[SimulationResult]) -> ProjectionSummary {
    let n = results.len() as f64;
    let mut histogram = vec![0u32; LADDER_SIZE];
    for r in results {
        histogram[r.final_position.ladder_index as usize] += 1;
    }

    let promoted = results.iter().filter(|r| r.net_ladder_change(start) > 0).count();
    let demoted = results.iter().filter(|r| r.net_ladder_change(start) < 0).count();

    ProjectionSummary {
        trials: results.len() as u32,
        mean_final_rating: results.iter().map(|r| r.final_rating).sum::<f64>() / n,
        mean_promotions: results.iter().map(|r| r.promotions as f64).sum::<f64>() / n,
        mean_demotions: results.iter().map(|r| r.demotions as f64).sum::<f64>() / n,
        promotion_probability: promoted as f64 / n,
        demotion_probability: demoted as f64 / n,
        final_index_histogram: histogram
    }
}
