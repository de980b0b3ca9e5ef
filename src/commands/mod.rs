pub mod backtest;
pub mod batch;
pub mod simulate;

use anyhow::Context;
use log::info;
use std::fs;
use std::path::Path;

pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(value) => value,
        None => {
            let value = rand::random();
            info!("No seed given; using {}", value);
            value
        }
    }
}

pub(crate) fn write_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
