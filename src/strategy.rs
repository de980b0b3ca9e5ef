use crate::error::StrategyError;
use crate::models::TestRecord;

pub trait Strategy {
    fn get_template_id(&self) -> &str;
    /// Shortest series on which the strategy can place a trade.
    fn get_min_data_points(&self) -> usize;
    /// Trade `prices` starting from `initial_fund` in cash and report the outcome.
    ///
    /// Every call starts from a fresh portfolio, so repeated runs on the same inputs agree.
    /// With `verbose` set, fills and a summary are written to standard output.
    fn run(
        &self,
        prices: &[f64],
        initial_fund: f64,
        verbose: bool,
    ) -> Result<TestRecord, StrategyError>;
}

#[path = "strategies/moving_average.rs"]
pub mod moving_average;

pub use moving_average::MovingAverageStrategy;

pub fn create_strategy(
    template_id: &str,
    window_length: usize,
) -> Result<Box<dyn Strategy + Send + Sync>, StrategyError> {
    match template_id {
        "moving_average" | "ma" => Ok(Box::new(MovingAverageStrategy::new(window_length)?)),
        other => Err(StrategyError::UnknownTemplate(other.to_string())),
    }
}

/// Checks shared by every strategy before a run touches the portfolio
pub fn validate_run_inputs(prices: &[f64], initial_fund: f64) -> Result<(), StrategyError> {
    if !initial_fund.is_finite() || initial_fund <= 0.0 {
        return Err(StrategyError::InvalidFund(initial_fund));
    }
    if let Some((index, &price)) = prices
        .iter()
        .enumerate()
        .find(|(_, price)| !price.is_finite() || **price <= 0.0)
    {
        return Err(StrategyError::InvalidPrice { index, price });
    }
    Ok(())
}
