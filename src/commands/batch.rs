use crate::batch::run_batch;
use crate::commands::write_json;
use crate::config::BatchConfig;
use anyhow::Result;
use log::info;
use std::path::Path;

const HISTOGRAM_BAR_WIDTH: usize = 50;

pub fn run(template_id: &str, config: &BatchConfig, output: Option<&Path>) -> Result<()> {
    let summary = run_batch(template_id, config)?;

    println!("{:.2}%", summary.statistics.mean * 100.0);
    for line in summary.histogram.render(HISTOGRAM_BAR_WIDTH) {
        println!("{}", line);
    }
    info!(
        "Return rates: median {:.2}%, std dev {:.2}%, range {:.2}% .. {:.2}%",
        summary.statistics.median * 100.0,
        summary.statistics.std_dev * 100.0,
        summary.statistics.min * 100.0,
        summary.statistics.max * 100.0
    );

    if output.is_some() {
        write_json(&summary, output)?;
    }
    Ok(())
}
