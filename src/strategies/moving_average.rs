use crate::error::StrategyError;
use crate::indicators;
use crate::models::{Portfolio, TestRecord};
use crate::trading_rules::{all_in_quantity, buy, print_summary, sell};
use log::debug;

/// Goes all-in when the price crosses above its trailing average and sells out when it crosses
/// back below.
pub struct MovingAverageStrategy {
    template_id: String,
    window_length: usize,
}

impl MovingAverageStrategy {
    pub fn new(window_length: usize) -> Result<Self, StrategyError> {
        if window_length == 0 {
            return Err(StrategyError::InvalidWindow);
        }
        Ok(Self {
            template_id: "moving_average".to_string(),
            window_length,
        })
    }

    pub fn window_length(&self) -> usize {
        self.window_length
    }
}

impl super::Strategy for MovingAverageStrategy {
    fn get_template_id(&self) -> &str {
        &self.template_id
    }

    fn get_min_data_points(&self) -> usize {
        self.window_length + 1
    }

    fn run(
        &self,
        prices: &[f64],
        initial_fund: f64,
        verbose: bool,
    ) -> Result<TestRecord, StrategyError> {
        super::validate_run_inputs(prices, initial_fund)?;

        let mut portfolio = Portfolio::new(initial_fund);
        let mut fills = Vec::new();
        let ma = indicators::moving_average(prices, self.window_length)?;

        if let Some(&first_average) = ma.first() {
            let mut was_below = prices[self.window_length] < first_average;
            for (ma_index, &average) in ma.iter().enumerate() {
                let i = ma_index + self.window_length;
                let price = prices[i];

                // Both checks see the flag from the previous day.
                if price > average && was_below {
                    let amount = all_in_quantity(portfolio.cash, price);
                    fills.extend(buy(&mut portfolio, price, amount, i + 1, verbose));
                }
                if price < average && !was_below {
                    let held = portfolio.shares;
                    fills.extend(sell(&mut portfolio, price, held, i + 1, verbose));
                }

                was_below = price < average;
            }
        } else {
            debug!(
                "Series of {} prices is too short for window {}; holding cash",
                prices.len(),
                self.window_length
            );
        }

        if let Some(&last_price) = prices.last() {
            let held = portfolio.shares;
            fills.extend(sell(
                &mut portfolio,
                last_price,
                held,
                prices.len(),
                verbose,
            ));
        }

        let record = TestRecord::new(initial_fund, portfolio.cash, fills);
        debug!(
            "{} (window {}): {} fills, profit {:.2}, return {:.4}",
            self.template_id,
            self.window_length,
            record.trade_count(),
            record.profit,
            record.return_rate
        );
        if verbose {
            print_summary(&record);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::super::Strategy;
    use super::*;
    use crate::models::{Fill, TradeSide};

    fn replay(initial_fund: f64, fills: &[Fill]) -> Portfolio {
        let mut portfolio = Portfolio::new(initial_fund);
        for fill in fills {
            match fill.side {
                TradeSide::Buy => {
                    portfolio.cash -= fill.notional();
                    portfolio.shares += fill.amount;
                }
                TradeSide::Sell => {
                    assert!(portfolio.shares >= fill.amount);
                    portfolio.cash += fill.notional();
                    portfolio.shares -= fill.amount;
                }
            }
            assert!(portfolio.cash >= 0.0);
        }
        portfolio
    }

    #[test]
    fn test_constant_prices_never_trade() {
        let strategy = MovingAverageStrategy::new(2).unwrap();
        assert_eq!(strategy.window_length(), 2);
        let record = strategy.run(&[10.0; 6], 100.0, false).unwrap();
        assert!(record.fills.is_empty());
        assert_eq!(record.final_cash, 100.0);
        assert_eq!(record.profit, 0.0);
        assert_eq!(record.return_rate, 0.0);
    }

    #[test]
    fn test_crossover_buys_and_sells() {
        let strategy = MovingAverageStrategy::new(2).unwrap();
        let prices = [10.0, 9.0, 8.0, 12.0, 13.0, 6.0];
        let record = strategy.run(&prices, 100.0, false).unwrap();

        assert_eq!(
            record.fills,
            vec![
                Fill {
                    side: TradeSide::Buy,
                    amount: 8,
                    price: 12.0,
                    day: 4,
                },
                Fill {
                    side: TradeSide::Sell,
                    amount: 8,
                    price: 6.0,
                    day: 6,
                },
            ]
        );
        assert_eq!(record.final_cash, 52.0);
        assert_eq!(record.profit, -48.0);
        assert!((record.return_rate + 0.48).abs() < 1e-12);
    }

    #[test]
    fn test_all_in_buy_uses_true_floor() {
        let strategy = MovingAverageStrategy::new(2).unwrap();
        let prices = [0.2, 0.2, 0.05, 0.1, 0.1];
        let record = strategy.run(&prices, 1.0, false).unwrap();

        let first = &record.fills[0];
        assert_eq!(first.side, TradeSide::Buy);
        assert_eq!(first.amount, 9);
        assert_eq!(first.day, 5);
        assert_eq!(record.fills.len(), 2);
        assert_eq!(record.fills[1].amount, 9);
        assert!((record.final_cash - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_open_position_is_liquidated_on_last_day() {
        let strategy = MovingAverageStrategy::new(2).unwrap();
        let prices = [10.0, 9.0, 8.0, 12.0, 13.0, 14.0];
        let record = strategy.run(&prices, 100.0, false).unwrap();

        let last = record.fills.last().unwrap();
        assert_eq!(last.side, TradeSide::Sell);
        assert_eq!(last.amount, 8);
        assert_eq!(last.price, 14.0);
        assert_eq!(last.day, prices.len());
        assert_eq!(record.final_cash, 4.0 + 8.0 * 14.0);
        assert_eq!(replay(100.0, &record.fills).shares, 0);
    }

    #[test]
    fn test_window_too_long_holds_cash() {
        let strategy = MovingAverageStrategy::new(6).unwrap();
        let record = strategy
            .run(&[10.0, 9.0, 8.0, 12.0, 13.0, 6.0], 100.0, false)
            .unwrap();
        assert!(record.fills.is_empty());
        assert_eq!(record.return_rate, 0.0);

        let record = strategy.run(&[], 100.0, false).unwrap();
        assert_eq!(record.final_cash, 100.0);
    }

    #[test]
    fn test_runs_are_repeatable() {
        let strategy = MovingAverageStrategy::new(3).unwrap();
        let prices = [
            50.0, 49.5, 48.0, 51.0, 53.0, 52.0, 47.0, 46.5, 49.0, 55.0, 54.0, 50.0,
        ];
        let first = strategy.run(&prices, 1_000.0, false).unwrap();
        let second = strategy.run(&prices, 1_000.0, false).unwrap();
        assert_eq!(first, second);

        let end = replay(1_000.0, &first.fills);
        assert_eq!(end.shares, 0);
        assert!((end.cash - first.final_cash).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert!(matches!(
            MovingAverageStrategy::new(0),
            Err(StrategyError::InvalidWindow)
        ));
        let strategy = MovingAverageStrategy::new(2).unwrap();
        assert_eq!(
            strategy.run(&[1.0, 2.0, 3.0], -5.0, false),
            Err(StrategyError::InvalidFund(-5.0))
        );
        assert!(matches!(
            strategy.run(&[1.0, 0.0, 3.0], 5.0, false),
            Err(StrategyError::InvalidPrice { index: 1, .. })
        ));
    }
}
