pub mod adjustment_kind;
pub mod confidence;
pub mod match_record;
pub mod prediction;
pub mod rank_position;
pub mod rating_state;
pub mod simulation;
pub mod tier;
