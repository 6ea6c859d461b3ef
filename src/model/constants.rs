// Ladder shape
pub const MAX_LADDER_INDEX: u8 = 20;
pub const LADDER_SIZE: usize = MAX_LADDER_INDEX as usize + 1;
pub const POINTS_PER_RUNG: i32 = 100;
pub const MAX_DISPLAY_POINTS: i32 = POINTS_PER_RUNG - 1;

/// Baseline rating per ladder index. Versioned: historical comparisons depend on these exact values.
pub const BASELINE_TABLE_VERSION: u32 = 1;
pub const BASELINE_RATINGS: [i32; LADDER_SIZE] = [
    0, 500, 900, 1100, 1400, 1480, 1550, 1620, 1700, 1800, 1880, 1960, 2020, 2070, 2100, 2150, 2170, 2230, 2300, 2370,
    2500
];

// Rating estimator constants
pub const NEW_SEASON_DEVIATION: f64 = 2.5;
pub const RETURNING_DEVIATION: f64 = 1.8;
pub const BLENDED_SEASON_DEVIATION: f64 = 2.2;
pub const KNOWN_PRIOR_VOLATILITY: f64 = 0.06;
pub const DEFAULT_VOLATILITY: f64 = 0.08;
pub const DEVIATION_FLOOR: f64 = 0.8;
pub const VOLATILITY_FLOOR: f64 = 0.04;
pub const DEVIATION_DECAY: f64 = 0.05;
pub const DEVIATION_SURPRISE_WEIGHT: f64 = 0.1;
pub const VOLATILITY_SURPRISE_WEIGHT: f64 = 0.005;
pub const SURPRISE_SCALE: f64 = 20.0;

pub const BASE_WIN_DELTA: f64 = 15.0;
pub const BASE_LOSS_DELTA: f64 = -12.0;
pub const BASE_DRAW_DELTA: f64 = 2.0;

pub const DIFFICULTY_PIVOT_RATING: f64 = 1800.0;
pub const DIFFICULTY_MIN: f64 = 0.5;
pub const DIFFICULTY_MAX: f64 = 2.0;

pub const MIN_WIN_RATING_GAIN: f64 = 5.0;
pub const MIN_LOSS_RATING_DROP: f64 = -5.0;
pub const DECISIVE_RATING_WEIGHT: f64 = 0.8;
pub const DRAW_RATING_WEIGHT: f64 = 0.5;

// Tunable defaults, see `EngineConfig`
pub const DEFAULT_K_FACTOR: f64 = 27.0;
pub const SHIELDED_EFFECTIVE_DELTA: i32 = -12;
pub const DIMINISHING_RETURNS_DIVISOR: f64 = 2000.0;
pub const DIMINISHING_RETURNS_FLOOR: f64 = 0.05;
pub const SYMMETRY_TOLERANCE: i32 = 5;
pub const MAX_SIMULATION_GAMES: u32 = 100;
// Largest average per-game delta a simulation accepts, one full rung
pub const MAX_AVERAGE_DELTA: f64 = POINTS_PER_RUNG as f64;
pub const LOW_VARIANCE_THRESHOLD: f64 = 25.0;
pub const MEDIUM_VARIANCE_THRESHOLD: f64 = 50.0;

// Elo logistic scale
pub const LOGISTIC_SCALE: f64 = 400.0;

// Confidence scorer
pub const CONFIDENCE_MEDIUM_THRESHOLD: u8 = 50;
pub const CONFIDENCE_HIGH_THRESHOLD: u8 = 75;
pub const SEASON_CONTEXT_PENALTY: i32 = 10;
pub const SHIELD_BONUS: i32 = 5;
pub const SPARSE_SAMPLE_MATCHES: usize = 3;
pub const SPARSE_SAMPLE_CAP: i32 = 40;
pub const WIN_RATE_BAND_MIN_MATCHES: usize = 5;
