// src/error.rs

use thiserror::Error;

/// Rejections raised while validating or editing [`crate::Settings`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be within [0, 100], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("event type chances add up to {0}, which is more than 100")]
    ProbabilitiesExceedTotal(f64),

    #[error("MIN_GAP ({min}) is larger than MAX_GAP ({max})")]
    GapBoundsInverted { min: f64, max: f64 },

    #[error("MIN_GAP must be positive, got {0}")]
    NonPositiveGap(f64),

    #[error("MAX_GAP ({max_gap}) does not fit in a playfield of height {height}")]
    PlayfieldTooSmall { height: f64, max_gap: f64 },

    #[error("TIC_RATE must be positive, got {0}")]
    NonPositiveTicRate(f64),

    #[error("{name} must be a finite, non-negative number, got {value}")]
    InvalidValue { name: &'static str, value: f64 },

    #[error("INITIAL_LIQUIDITY ({initial}) is below LIQUIDITY_FLOOR ({floor})")]
    LiquiditySeedBelowFloor { initial: u64, floor: u64 },

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures of the host key-value surface holding the high score.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("high score storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("high score record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type StorageResult<T> = std::result::Result<T, StorageError>;
