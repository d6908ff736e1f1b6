//! Runtime configuration read from environment variables.
//!
//! Every variable is optional. Values that are missing, empty, or do not
//! parse fall back to the defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_BOARD_DIMENSION, TICK_MS};

pub const BOARD_WIDTH_VAR: &str = "TOMINO_BOARD_WIDTH";
pub const BOARD_HEIGHT_VAR: &str = "TOMINO_BOARD_HEIGHT";
pub const SEED_VAR: &str = "TOMINO_SEED";
pub const TICK_MS_VAR: &str = "TOMINO_TICK_MS";
pub const LOG_PATH_VAR: &str = "TOMINO_LOG_PATH";
pub const LOG_FILTER_VAR: &str = "TOMINO_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub board_width: i32,
    pub board_height: i32,
    pub seed: u32,
    pub tick_ms: u32,
    /// No logging unless set.
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            seed: 1,
            tick_ms: TICK_MS,
            log_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let dimension = |key: &str, default: i32| {
            value(key)
                .and_then(|s| s.parse::<i32>().ok())
                .filter(|&v| v > 0 && v <= MAX_BOARD_DIMENSION)
                .unwrap_or(default)
        };

        Self {
            board_width: dimension(BOARD_WIDTH_VAR, defaults.board_width),
            board_height: dimension(BOARD_HEIGHT_VAR, defaults.board_height),
            seed: value(SEED_VAR)
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.seed),
            tick_ms: value(TICK_MS_VAR)
                .and_then(|s| s.parse().ok())
                .filter(|&v: &u32| v > 0)
                .unwrap_or(defaults.tick_ms),
            log_path: value(LOG_PATH_VAR).map(PathBuf::from),
            log_filter: value(LOG_FILTER_VAR).unwrap_or(defaults.log_filter),
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_ms))
    }

    /// Seconds per tick, as passed to `Game::update`.
    pub fn tick_seconds(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }
}
