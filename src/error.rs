//! Error types shared across the crate.

use crate::state::game::SessionPhase;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid gameplay configuration values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("lane count must be at least 1")]
    NoLanes,

    #[error("note speed must be positive, got {0}")]
    InvalidSpeed(f64),

    #[error("lead time must be non-negative, got {0}")]
    InvalidLeadTime(f64),

    #[error(
        "hit window thresholds must be positive and strictly ascending \
         (perfect {perfect}, great {great}, good {good}, bad {bad})"
    )]
    UnorderedWindows {
        perfect: f64,
        great: f64,
        good: f64,
        bad: f64,
    },

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

/// Failures while reading or writing the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to access settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid settings: {0}")]
    Invalid(#[from] ConfigError),
}

/// Defects found in a chart handed to the core.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("chart has no notes")]
    Empty,

    #[error("note {index} is earlier than the note before it")]
    Unsorted { index: usize },

    #[error("note {index} uses lane {lane}, but only {lane_count} lanes exist")]
    LaneOutOfRange {
        index: usize,
        lane: usize,
        lane_count: usize,
    },

    #[error("note {index} has an invalid time {time_ms}")]
    InvalidTime { index: usize, time_ms: f64 },

    #[error("failed to read chart: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed chart document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected session lifecycle requests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("playback device is not ready")]
    PlaybackUnavailable,

    #[error("cannot {action} while {from:?}")]
    InvalidTransition {
        from: SessionPhase,
        action: &'static str,
    },
}

/// Song library failures.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("failed to access song library {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed song library: {0}")]
    Json(#[from] serde_json::Error),
}
