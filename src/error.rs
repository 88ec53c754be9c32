//! Error types
//!
//! The simulation itself has no failure modes once a match is running; the
//! only rejectable input is the match configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("map dimensions must be positive and finite, got {width}x{height}")]
    InvalidMapSize { width: f64, height: f64 },
    #[error("map {width}x{height} leaves no spawn area inside a {margin} unit margin")]
    MapTooSmallForMargin { width: f64, height: f64, margin: f64 },
    #[error("`{field}` must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("bot count {count} exceeds the limit of {max}")]
    TooManyBots { count: usize, max: usize },
    #[error("bot speed range [{min}, {max}) is empty")]
    EmptyBotSpeedRange { min: f64, max: f64 },
    #[error("storm floor {floor} exceeds initial storm radius {initial}")]
    StormFloorAboveInitial { floor: f64, initial: f64 },
    #[error("fire-roll threshold {0} must be below 100")]
    FireRollThreshold(u32),
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
