use crate::error::SimulationError;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::env;

pub const SETTING_KEYS: &[&str] = &[
    "SIM_NUM_DAYS",
    "SIM_INIT_PRICE",
    "SIM_VOLATILITY",
    "SIM_SEED",
    "BATCH_TRIALS",
    "MA_WINDOW_LENGTH",
    "INITIAL_FUND",
    "HISTOGRAM_BINS",
];

/// Parameters of the geometric Brownian motion price path
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub num_days: usize,
    pub init_price: f64,
    pub volatility: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_days: 240,
            init_price: 100.0,
            volatility: 0.01,
        }
    }
}

impl SimulationConfig {
    pub fn from_settings_map(settings: &HashMap<String, String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            num_days: setting_usize(settings, "SIM_NUM_DAYS", defaults.num_days, 0)?,
            init_price: setting_f64(
                settings,
                "SIM_INIT_PRICE",
                defaults.init_price,
                Some(f64::MIN_POSITIVE),
                None,
            )?,
            volatility: setting_f64(
                settings,
                "SIM_VOLATILITY",
                defaults.volatility,
                Some(0.0),
                None,
            )?,
        })
    }

    pub fn validate(&self) -> std::result::Result<(), SimulationError> {
        if !self.init_price.is_finite() || self.init_price <= 0.0 {
            return Err(SimulationError::InvalidParameter {
                name: "init_price",
                value: self.init_price,
            });
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(SimulationError::InvalidParameter {
                name: "volatility",
                value: self.volatility,
            });
        }
        Ok(())
    }
}

/// Configuration for repeated simulate-and-backtest trials
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub trials: usize,
    pub window_length: usize,
    pub initial_fund: f64,
    pub histogram_bins: usize,
    /// Base seed; trial `t` uses `seed + t`. Drawn from entropy when unset.
    pub seed: Option<u64>,
    pub threads: usize,
    pub show_progress: bool,
    pub simulation: SimulationConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            window_length: 20,
            initial_fund: 1_000_000.0,
            histogram_bins: 20,
            seed: None,
            threads: num_cpus::get(),
            show_progress: false,
            simulation: SimulationConfig::default(),
        }
    }
}

impl BatchConfig {
    pub fn from_settings_map(settings: &HashMap<String, String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            trials: setting_usize(settings, "BATCH_TRIALS", defaults.trials, 1)?,
            window_length: setting_usize(
                settings,
                "MA_WINDOW_LENGTH",
                defaults.window_length,
                1,
            )?,
            initial_fund: setting_f64(
                settings,
                "INITIAL_FUND",
                defaults.initial_fund,
                Some(f64::MIN_POSITIVE),
                None,
            )?,
            histogram_bins: setting_usize(
                settings,
                "HISTOGRAM_BINS",
                defaults.histogram_bins,
                1,
            )?,
            seed: setting_u64_opt(settings, "SIM_SEED")?,
            simulation: SimulationConfig::from_settings_map(settings)?,
            ..defaults
        })
    }
}

/// Collect the recognised settings from the process environment
pub fn load_settings_from_env() -> HashMap<String, String> {
    SETTING_KEYS
        .iter()
        .filter_map(|key| env::var(key).ok().map(|value| (key.to_string(), value)))
        .collect()
}

fn lookup_setting<'a>(settings: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    settings
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn setting_f64(
    settings: &HashMap<String, String>,
    key: &str,
    default: f64,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<f64> {
    let Some(raw) = lookup_setting(settings, key) else {
        return Ok(default);
    };
    let value = raw
        .parse::<f64>()
        .map_err(|_| anyhow!("Setting {} must be a number (value: {})", key, raw))?;
    if !value.is_finite() {
        return Err(anyhow!("Setting {} must be finite (value: {})", key, raw));
    }
    if let Some(min_value) = min {
        if value < min_value {
            return Err(anyhow!(
                "Setting {} must be >= {} (value: {})",
                key,
                min_value,
                raw
            ));
        }
    }
    if let Some(max_value) = max {
        if value > max_value {
            return Err(anyhow!(
                "Setting {} must be <= {} (value: {})",
                key,
                max_value,
                raw
            ));
        }
    }
    Ok(value)
}

fn setting_usize(
    settings: &HashMap<String, String>,
    key: &str,
    default: usize,
    min: usize,
) -> Result<usize> {
    let Some(raw) = lookup_setting(settings, key) else {
        return Ok(default);
    };
    let value = raw
        .parse::<usize>()
        .map_err(|_| anyhow!("Setting {} must be a whole number (value: {})", key, raw))?;
    if value < min {
        return Err(anyhow!(
            "Setting {} must be >= {} (value: {})",
            key,
            min,
            raw
        ));
    }
    Ok(value)
}

fn setting_u64_opt(settings: &HashMap<String, String>, key: &str) -> Result<Option<u64>> {
    lookup_setting(settings, key)
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|_| anyhow!("Setting {} must be an unsigned integer (value: {})", key, raw))
        })
        .transpose()
}
