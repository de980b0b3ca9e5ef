use crate::commands::{resolve_seed, write_json};
use crate::config::SimulationConfig;
use crate::simulation::generate_prices;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct SimulatedSeries<'a> {
    seed: u64,
    num_days: usize,
    init_price: f64,
    volatility: f64,
    prices: &'a [f64],
}

pub fn run(config: &SimulationConfig, seed: Option<u64>, output: Option<&Path>) -> Result<()> {
    let seed = resolve_seed(seed);
    let prices = generate_prices(config, &mut StdRng::seed_from_u64(seed))?;
    write_json(
        &SimulatedSeries {
            seed,
            num_days: config.num_days,
            init_price: config.init_price,
            volatility: config.volatility,
            prices: &prices,
        },
        output,
    )
}
