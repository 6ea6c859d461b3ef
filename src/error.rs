use thiserror::Error;

use crate::{model::error::ValidationError, provider::ProviderError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("This command needs a snapshot file (--snapshot or LADDER_SNAPSHOT)")]
    MissingSnapshot
}
