//! Error types for configuration and generation
//!
//! Configuration problems are reported before any attempt runs. Layouts that
//! fail to connect are retried internally and only surface once the attempt
//! budget is spent.

use thiserror::Error;

/// Invalid generator settings, rejected before generation starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("dungeon dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("minimum room size must be positive, got {0}")]
    InvalidMinRoomSize(i32),

    #[error("minimum room size {min_size} does not fit in a {width}x{height} dungeon")]
    MinRoomSizeTooLarge {
        min_size: i32,
        width: i32,
        height: i32,
    },

    #[error("percentage of rooms to remove must be within 0..=100, got {0}")]
    InvalidPrunePercent(f64),

    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
}

/// Failures reported by the retry controller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(
        "could not generate a connected dungeon within {attempts} attempts across {reseeds} reseeds"
    )]
    AttemptsExhausted { attempts: u32, reseeds: u32 },

    #[error("generation already finished")]
    Finished,
}
