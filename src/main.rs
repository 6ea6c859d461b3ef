use clap::Parser;
use ladder_rating::{
    args::{parse_outcome_sequence, Args, Command},
    config::EngineConfig,
    error::AppError,
    model::{
        confidence::score_confidence,
        counter_predictor::CounterPredictor,
        ladder::{carry_lifetime_delta, reconstruct_lifetime_delta},
        progression_simulator::{BernoulliOutcomes, FixedOutcomes, ProgressionSimulator},
        rating_estimator::RatingEstimator,
        structures::{match_record::MatchRecord, rank_position::RankPosition, rating_state::RatingEstimate}
    },
    provider::{CurrentRank, MatchHistoryProvider, RankProvider, SnapshotFile},
    report::{build_report, history_averages, simulation_params, ReportOptions}
};
use serde::Serialize;
use serde_json::json;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = EngineConfig::from_env();
    info!(?config, "Engine configuration loaded");

    match config.validate().map_err(AppError::from).and_then(|_| run(&args, &config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: &str) {
    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}

fn snapshot(args: &Args) -> Result<SnapshotFile, AppError> {
    let path = args.snapshot.as_ref().ok_or(AppError::MissingSnapshot)?;
    Ok(SnapshotFile::load(path)?)
}

fn load_player(
    args: &Args,
    player: &str,
    config: &EngineConfig
) -> Result<(CurrentRank, Vec<MatchRecord>, RatingEstimate), AppError> {
    let snapshot = snapshot(args)?;
    let rank = snapshot.current_rank(player)?;
    let history = snapshot.match_history(player)?;

    let estimate = RatingEstimator::new(*config).estimate_rating(
        &rank.position,
        rank.is_new_season,
        rank.previous_rating,
        &history
    )?;

    Ok((rank, history, estimate))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: &Args, config: &EngineConfig) -> Result<(), AppError> {
    match &args.command {
        Command::Estimate { player } => {
            let (_, _, estimate) = load_player(args, player, config)?;

            print_json(&estimate)
        }
        Command::Confidence { player } => {
            let snapshot = snapshot(args)?;
            let rank = snapshot.current_rank(player)?;
            let history = snapshot.match_history(player)?;

            print_json(&score_confidence(&history, rank.is_new_season, config))
        }
        Command::Predict {
            delta,
            outcome,
            rating,
            k
        } => {
            let k = k.unwrap_or(config.k_factor);
            let prediction =
                CounterPredictor::new(*config).predict_counter_delta(*delta, (*outcome).into(), *rating, k)?;

            print_json(&prediction)
        }
        Command::Symmetry {
            win_delta,
            loss_delta,
            rating,
            k
        } => {
            let k = k.unwrap_or(config.k_factor);
            let report = CounterPredictor::new(*config).check_symmetry(*win_delta, *loss_delta, *rating, k)?;

            print_json(&report)
        }
        Command::Simulate {
            player,
            games,
            outcomes,
            seed
        } => {
            let (rank, history, estimate) = load_player(args, player, config)?;
            let averages = history_averages(&history, config.shielded_delta);
            let params = simulation_params(&rank, estimate.state.rating, &averages, *games);
            let simulator = ProgressionSimulator::new(*config);

            let result = match outcomes {
                Some(sequence) => {
                    let sequence = parse_outcome_sequence(sequence).map_err(AppError::InvalidArgument)?;
                    simulator.simulate_progression(&params, &mut FixedOutcomes::new(sequence))?
                }
                None => simulator.simulate_progression(&params, &mut BernoulliOutcomes::seeded(*seed))?
            };

            print_json(&result)
        }
        Command::Project {
            player,
            games,
            trials,
            seed
        } => {
            let (rank, history, estimate) = load_player(args, player, config)?;
            let averages = history_averages(&history, config.shielded_delta);
            let params = simulation_params(&rank, estimate.state.rating, &averages, *games);

            let summary =
                ProgressionSimulator::new(*config).project_progression(&params, *trials, *seed, args.progress)?;

            print_json(&summary)
        }
        Command::Report {
            player,
            games,
            trials,
            seed
        } => {
            let snapshot = snapshot(args)?;
            let options = ReportOptions {
                games: *games,
                trials: *trials,
                seed: *seed,
                show_progress: args.progress
            };

            print_json(&build_report(&snapshot, player, config, &options)?)
        }
        Command::Lifetime {
            from,
            from_points,
            to,
            to_points
        } => {
            let from = RankPosition::from_label(from, *from_points)?;
            let to = RankPosition::from_label(to, *to_points)?;
            let delta = reconstruct_lifetime_delta(&from, &to);
            let carried = carry_lifetime_delta(from, delta);

            print_json(&json!({
                "from": from,
                "to": to,
                "delta": delta,
                "rungsPromoted": carried.rungs_promoted,
                "rungsDemoted": carried.rungs_demoted
            }))
        }
    }
}
