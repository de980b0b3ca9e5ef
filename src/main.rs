use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use crossover_sim::commands::{backtest, batch, simulate};
use crossover_sim::config::{load_settings_from_env, BatchConfig, SimulationConfig};
use log::info;
use std::path::PathBuf;

const DEFAULT_STRATEGY: &str = "moving_average";

#[derive(Parser)]
#[command(name = "crossover-sim")]
#[command(about = "Backtest a moving-average crossover rule on simulated price paths")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SimulationArgs {
    /// Number of trading days per path
    #[arg(long = "days")]
    num_days: Option<usize>,
    /// Price on day zero
    #[arg(long)]
    init_price: Option<f64>,
    /// Daily volatility of the log price
    #[arg(long)]
    volatility: Option<f64>,
    /// Seed for the price generator (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one price path and print it as JSON
    Simulate {
        #[command(flatten)]
        simulation: SimulationArgs,
        /// Write the series to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Generate one price path and trade it, narrating every fill
    Backtest {
        #[command(flatten)]
        simulation: SimulationArgs,
        /// Strategy template
        #[arg(long, default_value = DEFAULT_STRATEGY)]
        strategy: String,
        /// Moving average window length in days
        #[arg(long)]
        window: Option<usize>,
        /// Starting cash
        #[arg(long)]
        fund: Option<f64>,
        /// Suppress the trade narration
        #[arg(short, long)]
        quiet: bool,
    },
    /// Run many independent trials and summarise the return rates
    Batch {
        #[command(flatten)]
        simulation: SimulationArgs,
        /// Strategy template
        #[arg(long, default_value = DEFAULT_STRATEGY)]
        strategy: String,
        /// Number of trials
        #[arg(long)]
        trials: Option<usize>,
        /// Moving average window length in days
        #[arg(long)]
        window: Option<usize>,
        /// Starting cash per trial
        #[arg(long)]
        fund: Option<f64>,
        /// Histogram bin count
        #[arg(long)]
        bins: Option<usize>,
        /// Worker threads (defaults to the number of logical CPUs)
        #[arg(long)]
        threads: Option<usize>,
        /// Export the batch summary as JSON
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = load_settings_from_env();
    let mut config = BatchConfig::from_settings_map(&settings)?;
    info!("Loaded {} setting(s) from the environment", settings.len());

    match cli.command {
        Commands::Simulate { simulation, output } => {
            apply_simulation_args(&mut config.simulation, &simulation);
            simulate::run(
                &config.simulation,
                simulation.seed.or(config.seed),
                output.as_deref(),
            )?;
        }
        Commands::Backtest {
            simulation,
            strategy,
            window,
            fund,
            quiet,
        } => {
            apply_simulation_args(&mut config.simulation, &simulation);
            backtest::run(
                &strategy,
                window.unwrap_or(config.window_length),
                fund.unwrap_or(config.initial_fund),
                &config.simulation,
                simulation.seed.or(config.seed),
                !quiet,
            )?;
        }
        Commands::Batch {
            simulation,
            strategy,
            trials,
            window,
            fund,
            bins,
            threads,
            output,
        } => {
            apply_simulation_args(&mut config.simulation, &simulation);
            config.seed = simulation.seed.or(config.seed);
            config.trials = trials.unwrap_or(config.trials);
            config.window_length = window.unwrap_or(config.window_length);
            config.initial_fund = fund.unwrap_or(config.initial_fund);
            config.histogram_bins = bins.unwrap_or(config.histogram_bins);
            config.threads = threads.unwrap_or(config.threads);
            config.show_progress = true;
            batch::run(&strategy, &config, output.as_deref())?;
        }
    }

    Ok(())
}

fn apply_simulation_args(config: &mut SimulationConfig, args: &SimulationArgs) {
    if let Some(num_days) = args.num_days {
        config.num_days = num_days;
    }
    if let Some(init_price) = args.init_price {
        config.init_price = init_price;
    }
    if let Some(volatility) = args.volatility {
        config.volatility = volatility;
    }
}
