use crate::config::SimulationConfig;
use crate::error::SimulationError;
use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;

/// Truncate to whole cents. Always rounds toward negative infinity, never to nearest.
pub fn truncate_to_cents(price: f64) -> f64 {
    (price * 100.0).floor() / 100.0
}

/// Simulates a daily price path with geometric Brownian motion.
///
/// Each day adds `volatility * z` (with `z` standard normal) to the running log return, and the
/// price is `init_price * exp(log_return)` truncated to cents. A zero-day config yields an empty
/// path.
pub fn generate_prices<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<Vec<f64>, SimulationError> {
    config.validate()?;
    let standard_normal =
        Normal::new(0.0, 1.0).map_err(|err| SimulationError::Distribution(err.to_string()))?;

    let mut prices = Vec::with_capacity(config.num_days);
    let mut log_return = 0.0;
    for _ in 0..config.num_days {
        log_return += config.volatility * standard_normal.sample(&mut *rng);
        prices.push(truncate_to_cents(config.init_price * log_return.exp()));
    }

    Ok(prices)
}
