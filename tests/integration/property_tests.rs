use approx::assert_abs_diff_eq;
use ladder_rating::{
    config::EngineConfig,
    model::{
        confidence::score_confidence,
        constants::{MAX_DISPLAY_POINTS, MAX_LADDER_INDEX},
        counter_predictor::CounterPredictor,
        ladder::{advance_one_step, carry_lifetime_delta, reconstruct_lifetime_delta},
        progression_simulator::{FixedOutcomes, ProgressionSimulator},
        rating_estimator::RatingEstimator,
        structures::{
            confidence::ConfidenceLabel,
            match_record::{MatchOutcome, MatchRecord},
            rank_position::RankPosition,
            simulation::SimulationParams,
            tier::Rung
        }
    },
    utils::test_utils::{generate_alternating_history, generate_history}
};

use crate::common::init_test_env;

fn position(ladder_index: u8, display_points: i32) -> RankPosition {
    RankPosition::new(ladder_index, display_points).unwrap()
}

#[test]
fn test_ladder_round_trip_and_zero_advance() {
    init_test_env();

    for index in 0..=MAX_LADDER_INDEX {
        for points in 0..=MAX_DISPLAY_POINTS {
            let original = position(index, points);
            let rung = Rung::from_ladder_index(index).unwrap();
            let label = rung.to_string();

            assert_eq!(rung.ladder_index(), index);
            assert_eq!(RankPosition::from_label(&label, points).unwrap(), original);

            let unchanged = advance_one_step(original, 0);
            assert_eq!(unchanged.position, original);
            assert!(!unchanged.promoted && !unchanged.demoted);
        }

        if index < MAX_LADDER_INDEX {
            assert!(RankPosition::new(index, 100).is_err());
        }
    }
}

#[test]
fn test_promotion_carry() {
    init_test_env();
    let step = advance_one_step(position(5, 95), 20);

    assert_eq!(step.position, position(6, 15));
    assert!(step.promoted);
    assert!(!step.demoted);
}

#[test]
fn test_demotion_borrow() {
    init_test_env();
    let step = advance_one_step(position(5, 10), -15);

    assert_eq!(step.position, position(4, 95));
    assert!(step.demoted);
    assert!(!step.promoted);
}

#[test]
fn test_saturation_at_both_ends() {
    init_test_env();
    let top = advance_one_step(position(20, 80), 50);
    let bottom = advance_one_step(position(0, 10), -50);

    assert_eq!(top.position.ladder_index, 20);
    assert!(!top.promoted);
    assert_eq!(bottom.position, position(0, 0));
    assert!(!bottom.demoted);
}

#[test]
fn test_lifetime_reconstruction_lands_on_target() {
    init_test_env();
    let snapshots = [
        position(0, 0),
        position(3, 45),
        position(9, 99),
        position(15, 12),
        position(19, 60),
        position(20, 340)
    ];

    for from in snapshots {
        for to in snapshots {
            let delta = reconstruct_lifetime_delta(&from, &to);
            assert_eq!(carry_lifetime_delta(from, delta).position, to, "{} -> {}", from, to);
        }
    }
}

#[test]
fn test_estimator_worked_example() {
    init_test_env();
    let estimator = RatingEstimator::default();
    let state = estimator.initialize(&position(8, 50), false, None);

    assert_abs_diff_eq!(state.rating, 1750.0);
    assert_abs_diff_eq!(state.deviation, 1.8);
    assert_abs_diff_eq!(state.volatility, 0.08);

    let estimate = estimator
        .estimate_rating(&position(8, 50), false, None, &[MatchRecord::win(20)])
        .unwrap();

    assert_abs_diff_eq!(estimate.state.rating, 1766.0);
    assert_abs_diff_eq!(estimate.state.deviation, 1.775, epsilon = 1e-12);
    assert_abs_diff_eq!(estimate.state.volatility, 0.08125, epsilon = 1e-12);
    assert_eq!(estimate.adjustments[1].expected_delta, 15);
    assert_abs_diff_eq!(estimate.adjustments[1].surprise, 0.25);
}

#[test]
fn test_self_consistent_deltas_never_warn() {
    init_test_env();
    let predictor = CounterPredictor::default();

    for rating in [900.0, 1500.0, 1800.0, 2300.0] {
        for k in [20.0, 27.0, 32.0, 40.0] {
            for win_delta in 1..(k as i32) {
                let loss_delta = match predictor
                    .predict_counter_delta(win_delta, MatchOutcome::Win, rating, k)
                    .unwrap()
                    .predicted_delta
                {
                    Some(loss_delta) => loss_delta,
                    None => continue
                };

                let report = predictor.check_symmetry(win_delta, loss_delta, rating, k).unwrap();
                assert!(
                    report.is_consistent(),
                    "rating {} k {} win {} loss {}: {:?}",
                    rating,
                    k,
                    win_delta,
                    loss_delta,
                    report.warnings
                );
            }
        }
    }
}

#[test]
fn test_confidence_boundaries() {
    init_test_env();
    let config = EngineConfig::default();

    let steady = generate_alternating_history(8, 15, -13);
    let high = score_confidence(&steady, false, &config);
    assert_eq!(high.score, 90);
    assert_eq!(high.label, ConfidenceLabel::High);

    for seed in 0..20 {
        let sparse = generate_history(2, 0.5, seed);
        let low = score_confidence(&sparse, seed % 2 == 0, &config);

        assert_eq!(low.breakdown.sample_size, 10);
        assert_eq!(low.label, ConfidenceLabel::Low);
    }
}

#[test]
fn test_fixed_outcome_simulation_is_reproducible() {
    init_test_env();
    let simulator = ProgressionSimulator::default();
    let params = SimulationParams {
        rating: 1760.0,
        start: position(8, 50),
        win_rate: 0.5,
        avg_win_delta: 30.0,
        avg_loss_delta: -15.0,
        games: 60
    };
    let sequence = vec![true, true, false, true, false, false, true];

    let first = simulator
        .simulate_progression(&params, &mut FixedOutcomes::new(sequence.clone()))
        .unwrap();
    let second = simulator
        .simulate_progression(&params, &mut FixedOutcomes::new(sequence))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_seeded_projection_is_reproducible() {
    init_test_env();
    let simulator = ProgressionSimulator::default();
    let params = SimulationParams {
        rating: 1500.0,
        start: position(5, 30),
        win_rate: 0.55,
        avg_win_delta: 18.0,
        avg_loss_delta: -14.0,
        games: 30
    };

    let first = simulator.project_progression(&params, 64, 42, false).unwrap();
    let second = simulator.project_progression(&params, 64, 42, false).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.final_index_histogram.iter().sum::<u32>(), 64);
}
