use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A buy or sell that actually changed the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub side: TradeSide,
    pub amount: u64,
    pub price: f64,
    /// Display label, 1-based. Forced liquidation is labelled with the series length.
    pub day: usize,
}

impl Fill {
    pub fn notional(&self) -> f64 {
        self.price * self.amount as f64
    }
}

/// Cash and whole shares held during a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub cash: f64,
    pub shares: u64,
}

impl Portfolio {
    pub fn new(initial_fund: f64) -> Self {
        Self {
            cash: initial_fund,
            shares: 0,
        }
    }
}

/// Outcome of one strategy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub profit: f64,
    pub return_rate: f64,
    pub final_cash: f64,
    pub fills: Vec<Fill>,
}

impl TestRecord {
    pub fn new(initial_fund: f64, final_cash: f64, fills: Vec<Fill>) -> Self {
        let profit = final_cash - initial_fund;
        Self {
            profit,
            return_rate: profit / initial_fund,
            final_cash,
            fills,
        }
    }

    pub fn trade_count(&self) -> usize {
        self.fills.len()
    }
}
