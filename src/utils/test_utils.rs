use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::structures::match_record::{MatchOutcome, MatchRecord};

/// Generates `n` well-formed matches, one hour apart, from a seeded RNG.
///
/// Wins gain 10..=25, losses drop 8..=20. Roughly one loss in six is shielded.
pub fn generate_history(n: usize, win_rate: f64, seed: u64) -> Vec<MatchRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let start = base_time();

    (0..n)
        .map(|i| {
            let timestamp = start + Duration::hours(i as i64);
            let record = if rng.random_bool(win_rate) {
                MatchRecord::win(rng.random_range(10..=25))
            } else if rng.random_range(0..6) == 0 {
                MatchRecord::shielded_loss()
            } else {
                MatchRecord::loss(-rng.random_range(8..=20))
            };

            record.at(timestamp)
        })
        .collect()
}

/// Alternating win/loss history with fixed deltas
pub fn generate_alternating_history(n: usize, win_delta: i32, loss_delta: i32) -> Vec<MatchRecord> {
    (0..n)
        .map(|i| match i % 2 {
            0 => MatchRecord::win(win_delta),
            _ => MatchRecord::loss(loss_delta)
        })
        .collect()
}

pub fn generate_record(outcome: MatchOutcome, point_delta: i32, shielded: bool) -> MatchRecord {
    MatchRecord::new(outcome, point_delta, shielded).at(base_time())
}

fn base_time() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
        .fixed_offset()
}
