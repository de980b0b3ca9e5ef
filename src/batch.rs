use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::performance::{Histogram, PerformanceCalculator, ReturnStatistics};
use crate::simulation::generate_prices;
use crate::strategy::{create_strategy, Strategy};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub template_id: String,
    pub window_length: usize,
    pub trials: usize,
    pub base_seed: u64,
    pub initial_fund: f64,
    pub num_days: usize,
    pub statistics: ReturnStatistics,
    pub histogram: Histogram,
    /// One entry per trial, in trial order.
    pub return_rates: Vec<f64>,
    pub generated_at: DateTime<Utc>,
}

/// Seed used by trial `trial` of a batch started from `base_seed`.
pub fn trial_seed(base_seed: u64, trial: usize) -> u64 {
    base_seed.wrapping_add(trial as u64)
}

/// Runs `config.trials` independent simulate-and-backtest trials in parallel.
///
/// The strategy is built from `template_id` and `config.window_length`. Each trial draws its
/// own price path from a dedicated seeded RNG, so a batch with a fixed seed produces the same
/// return rates whatever the thread count.
pub fn run_batch(template_id: &str, config: &BatchConfig) -> Result<BatchSummary, BatchError> {
    if config.trials == 0 {
        return Err(BatchError::NoTrials);
    }
    if config.histogram_bins == 0 {
        return Err(BatchError::NoBins);
    }
    config.simulation.validate()?;
    crate::strategy::validate_run_inputs(&[], config.initial_fund)?;
    let strategy = create_strategy(template_id, config.window_length)?;
    let strategy = strategy.as_ref();

    let base_seed = config.seed.unwrap_or_else(rand::random);
    info!(
        "Running {} trials of {} (window {}) over {} days (seed {}, {} threads)",
        config.trials,
        strategy.get_template_id(),
        config.window_length,
        config.simulation.num_days,
        base_seed,
        config.threads
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|err| BatchError::ThreadPool(err.to_string()))?;

    let pb = if config.show_progress {
        ProgressBar::new(config.trials as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let started = Instant::now();
    let return_rates: Vec<f64> = pool.install(|| {
        (0..config.trials)
            .into_par_iter()
            .map(|trial| {
                let rate = run_trial(strategy, config, trial, trial_seed(base_seed, trial));
                pb.inc(1);
                rate
            })
            .collect::<Result<Vec<f64>, BatchError>>()
    })?;
    pb.finish_and_clear();

    let statistics = PerformanceCalculator::summarize(&return_rates);
    info!(
        "Completed {} trials in {:.2}s: mean return {:.2}%, {} profitable",
        config.trials,
        started.elapsed().as_secs_f64(),
        statistics.mean * 100.0,
        statistics.profitable_trials
    );

    Ok(BatchSummary {
        template_id: strategy.get_template_id().to_string(),
        window_length: config.window_length,
        trials: config.trials,
        base_seed,
        initial_fund: config.initial_fund,
        num_days: config.simulation.num_days,
        histogram: Histogram::from_values(&return_rates, config.histogram_bins),
        statistics,
        return_rates,
        generated_at: Utc::now(),
    })
}

fn run_trial(
    strategy: &(dyn Strategy + Send + Sync),
    config: &BatchConfig,
    trial: usize,
    seed: u64,
) -> Result<f64, BatchError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let prices = generate_prices(&config.simulation, &mut rng)
        .map_err(|source| BatchError::Simulation { trial, source })?;
    let record = strategy
        .run(&prices, config.initial_fund, false)
        .map_err(|source| BatchError::Strategy { trial, source })?;
    Ok(record.return_rate)
}
