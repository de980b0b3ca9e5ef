use crate::commands::resolve_seed;
use crate::config::SimulationConfig;
use crate::simulation::generate_prices;
use crate::strategy::create_strategy;
use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn run(
    template_id: &str,
    window_length: usize,
    initial_fund: f64,
    simulation: &SimulationConfig,
    seed: Option<u64>,
    verbose: bool,
) -> Result<()> {
    let strategy = create_strategy(template_id, window_length)?;
    let seed = resolve_seed(seed);
    let prices = generate_prices(simulation, &mut StdRng::seed_from_u64(seed))?;
    if prices.len() < strategy.get_min_data_points() {
        info!(
            "{} prices cannot produce a signal with window {}; the run will hold cash",
            prices.len(),
            window_length
        );
    }

    let record = strategy
        .run(&prices, initial_fund, verbose)
        .with_context(|| format!("backtest of {} failed", template_id))?;
    info!(
        "Backtest (seed {}): {} fills, profit {:.2}, return {:.2}%",
        seed,
        record.trade_count(),
        record.profit,
        record.return_rate * 100.0
    );

    Ok(())
}
