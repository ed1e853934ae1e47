//! Console configuration
//!
//! Loaded from a TOML file; every section falls back to the stock timings
//! and odds when omitted.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::constants::{AMBIENT_INTERVAL_MS, VITALS_INTERVAL_MS};
use crate::models::errors::ColonyResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Seed for the random number generator. None = pick one at startup.
    pub seed: Option<u64>,
    pub timing: TimingConfig,
    pub chances: ChanceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub vitals_interval_ms: u64,
    pub ship_interval_ms: u64,
    pub ambient_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            vitals_interval_ms: VITALS_INTERVAL_MS,
            ship_interval_ms: VITALS_INTERVAL_MS,
            ambient_interval_ms: AMBIENT_INTERVAL_MS,
        }
    }
}

/// Probabilities in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChanceConfig {
    pub complication: f64,
    pub ambient_entry: f64,
    pub ambient_warning: f64,
    pub vitals_warning_echo: f64,
    pub mission_update_echo: f64,
    pub return_to_hub: f64,
}

impl Default for ChanceConfig {
    fn default() -> Self {
        ChanceConfig {
            complication: 0.3,
            ambient_entry: 0.1,
            ambient_warning: 0.2,
            vitals_warning_echo: 0.3,
            mission_update_echo: 0.5,
            return_to_hub: 0.5,
        }
    }
}

impl ChanceConfig {
    /// Every chance set to the same value; handy for deterministic runs.
    pub fn fixed(p: f64) -> Self {
        ChanceConfig {
            complication: p,
            ambient_entry: p,
            ambient_warning: p,
            vitals_warning_echo: p,
            mission_update_echo: p,
            return_to_hub: p,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl ColonyConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ColonyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> ColonyResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_seed(seed: u64) -> Self {
        ColonyConfig {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
