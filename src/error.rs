use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("simulation parameter {name} is out of range (value: {value})")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("failed to build normal distribution: {0}")]
    Distribution(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("moving average window length must be greater than zero")]
    ZeroWindow,
}

#[derive(Debug, Error, PartialEq)]
pub enum StrategyError {
    #[error("window length must be greater than zero")]
    InvalidWindow,
    #[error("initial fund must be a positive finite amount (value: {0})")]
    InvalidFund(f64),
    #[error("price at index {index} must be positive and finite (value: {price})")]
    InvalidPrice { index: usize, price: f64 },
    #[error("unknown strategy template: {0}")]
    UnknownTemplate(String),
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch must run at least one trial")]
    NoTrials,
    #[error("histogram must have at least one bin")]
    NoBins,
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
    #[error("trial {trial} failed: {source}")]
    Simulation {
        trial: usize,
        #[source]
        source: SimulationError,
    },
    #[error("trial {trial} failed: {source}")]
    Strategy {
        trial: usize,
        #[source]
        source: StrategyError,
    },
    #[error(transparent)]
    InvalidConfig(#[from] StrategyError),
    #[error(transparent)]
    InvalidSimulation(#[from] SimulationError),
}
