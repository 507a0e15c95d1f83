//! # Runtime Configuration
//!
//! Simulation constants plus the runtime's own logging options.
//!
//! ## Sources
//!
//! Applied in order, later sources overriding earlier ones:
//!
//! 1. `SimulationConfig::default()`
//! 2. JSON file at `FFG_CONFIG` (missing fields keep their defaults)
//! 3. `FFG_*` environment variables, one per field
//!
//! The merged simulation config is validated before it is returned.

use anyhow::{Context, Result};
use shared_types::SimulationConfig;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Environment variable naming the JSON config file.
pub const CONFIG_FILE_VAR: &str = "FFG_CONFIG";

/// An `FFG_*` variable that could not be parsed.
#[derive(Debug, Error, PartialEq)]
#[error("{key}={value:?} is not a valid {expected}")]
pub struct EnvValueError {
    pub key: String,
    pub value: String,
    pub expected: &'static str,
}

/// Everything the binary needs to run.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub simulation: SimulationConfig,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// JSON log lines and a JSON summary instead of pretty output
    pub json_logs: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl RuntimeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::load(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup(CONFIG_FILE_VAR) {
            config.simulation = read_simulation_file(Path::new(&path))?;
            info!(path = %path, "loaded simulation config file");
        }

        config.apply_overrides(&lookup)?;
        config
            .simulation
            .validate()
            .context("simulation config rejected")?;
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) -> Result<(), EnvValueError> {
        let sim = &mut self.simulation;
        override_with(lookup, "FFG_NUM_VALIDATORS", &mut sim.num_validators)?;
        override_with(lookup, "FFG_EPOCH_SIZE", &mut sim.epoch_size)?;
        override_with(lookup, "FFG_BLOCK_PERIOD", &mut sim.block_period)?;
        override_with(lookup, "FFG_AVG_LATENCY", &mut sim.avg_latency)?;
        override_with(lookup, "FFG_INITIAL_DEPOSIT", &mut sim.initial_deposit)?;
        override_with(lookup, "FFG_SLASH_BPS", &mut sim.slash_bps)?;
        override_with(lookup, "FFG_REWARD_BPS", &mut sim.reward_bps)?;
        override_with(lookup, "FFG_BYZANTINE_FRACTION", &mut sim.byzantine_fraction)?;
        override_with(lookup, "FFG_REPLAY_PROBABILITY", &mut sim.replay_probability)?;
        override_with(lookup, "FFG_DISCONNECTED_FRACTION", &mut sim.disconnected_fraction)?;
        override_with(lookup, "FFG_EPOCHS", &mut sim.epochs)?;
        override_with(lookup, "FFG_SEED", &mut sim.seed)?;
        override_bool(lookup, "FFG_PARALLEL", &mut sim.parallel)?;
        override_bool(lookup, "FFG_SUPPRESS_DUPLICATES", &mut sim.suppress_duplicates)?;
        if let Some(raw) = lookup("FFG_DYNASTY_SIZE") {
            sim.dynasty_size = match raw.trim() {
                "" | "none" => None,
                value => Some(parse(value, "FFG_DYNASTY_SIZE")?),
            };
        }

        if let Some(level) = lookup("FFG_LOG_LEVEL") {
            self.log_level = level;
        }
        override_bool(lookup, "FFG_JSON_LOGS", &mut self.json_logs)?;
        Ok(())
    }
}

/// Parse a JSON simulation config.
pub fn read_simulation_file(path: &Path) -> Result<SimulationConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse<T: FromStr>(value: &str, key: &str) -> Result<T, EnvValueError> {
    value.trim().parse().map_err(|_| EnvValueError {
        key: key.to_string(),
        value: value.to_string(),
        expected: std::any::type_name::<T>(),
    })
}

fn override_with<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    field: &mut T,
) -> Result<(), EnvValueError> {
    if let Some(value) = lookup(key) {
        *field = parse(&value, key)?;
    }
    Ok(())
}

fn override_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, field: &mut bool) -> Result<(), EnvValueError> {
    if let Some(value) = lookup(key) {
        *field = match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => {
                return Err(EnvValueError {
                    key: key.to_string(),
                    value,
                    expected: "bool",
                })
            }
        };
    }
    Ok(())
}
