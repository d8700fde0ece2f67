use reelback_model::{ModelError, QualityCode, StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacklogError {
    #[error("Invalid status/quality combination ({status}, {quality:?}): {reason}")]
    InvalidCombination {
        status: StatusCode,
        quality: QualityCode,
        reason: &'static str,
    },

    #[error("Invalid quality preset: {0}")]
    InvalidPreset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BacklogError>;
