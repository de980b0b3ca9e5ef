use crate::models::{Fill, Portfolio, TestRecord, TradeSide};
use log::trace;

/// Largest whole number of shares `cash` can pay for at `price`.
///
/// Floors the exact quotient: `cash / price` alone can round up to the next whole number
/// when the true quotient sits just below it.
pub fn all_in_quantity(cash: f64, price: f64) -> u64 {
    if !price.is_finite() || price <= 0.0 || cash.is_nan() || cash <= 0.0 {
        return 0;
    }
    let remainder = cash % price;
    let quotient = (cash - remainder) / price;
    let mut whole = quotient.floor();
    if quotient - whole > 0.5 {
        whole += 1.0;
    }
    whole as u64
}

/// Buy `amount` shares at `price`.
///
/// Zero amounts and orders the cash cannot cover are ignored and leave the portfolio untouched.
pub fn buy(
    portfolio: &mut Portfolio,
    price: f64,
    amount: u64,
    day: usize,
    verbose: bool,
) -> Option<Fill> {
    let cost = price * amount as f64;
    if amount == 0 || portfolio.cash < cost {
        trace!(
            "Rejected buy of {} at {:.2} on day {} (cash {:.2})",
            amount,
            price,
            day,
            portfolio.cash
        );
        return None;
    }

    portfolio.cash -= cost;
    portfolio.shares += amount;
    if verbose {
        println!("Bought\t{:>8} at {:>8.2} on day {:>4}", amount, price, day);
    }

    Some(Fill {
        side: TradeSide::Buy,
        amount,
        price,
        day,
    })
}

/// Sell `amount` shares at `price`.
///
/// Zero amounts and sales larger than the current holding are ignored.
pub fn sell(
    portfolio: &mut Portfolio,
    price: f64,
    amount: u64,
    day: usize,
    verbose: bool,
) -> Option<Fill> {
    if amount == 0 || portfolio.shares < amount {
        trace!(
            "Rejected sell of {} at {:.2} on day {} (holding {})",
            amount,
            price,
            day,
            portfolio.shares
        );
        return None;
    }

    portfolio.cash += price * amount as f64;
    portfolio.shares -= amount;
    if verbose {
        println!("Sold\t{:>8} at {:>8.2} on day {:>4}", amount, price, day);
    }

    Some(Fill {
        side: TradeSide::Sell,
        amount,
        price,
        day,
    })
}

pub fn summary_lines(record: &TestRecord) -> [String; 3] {
    [
        format!("Cash remaining:\t{:>16.2}", record.final_cash),
        // Debug keeps the trailing `.0` on whole amounts.
        format!("Net profit:\t{:>16}", format!("{:?}", record.profit)),
        format!(
            "Rate of return:\t{:>16}",
            format!("{:.2}%", record.return_rate * 100.0)
        ),
    ]
}

pub fn print_summary(record: &TestRecord) {
    for line in summary_lines(record) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_in_quantity_floors() {
        assert_eq!(all_in_quantity(100.0, 12.0), 8);
        assert_eq!(all_in_quantity(96.0, 12.0), 8);
        assert_eq!(all_in_quantity(11.99, 12.0), 0);
        assert_eq!(all_in_quantity(100.0, 0.0), 0);
        assert_eq!(all_in_quantity(0.0, 12.0), 0);
    }

    #[test]
    fn test_all_in_quantity_never_rounds_up() {
        assert_eq!(all_in_quantity(1.0, 0.1), 9);
        assert_eq!(all_in_quantity(59.0 * 199.99, 199.99), 58);
        assert_eq!(all_in_quantity(0.3, 0.1), 2);
        assert_eq!(all_in_quantity(0.5, 0.25), 2);
        assert_eq!(all_in_quantity(1_000_000.0, 100.0), 10_000);
    }

    #[test]
    fn test_summary_lines_format() {
        let record = TestRecord::new(100.0, 52.0, Vec::new());
        let [cash, profit, rate] = summary_lines(&record);
        assert_eq!(cash, format!("Cash remaining:\t{:>16}", "52.00"));
        assert_eq!(profit, format!("Net profit:\t{:>16}", "-48.0"));
        assert_eq!(rate, format!("Rate of return:\t{:>16}", "-48.00%"));

        let record = TestRecord::new(100.0, 100.25, Vec::new());
        assert_eq!(
            summary_lines(&record)[1],
            format!("Net profit:\t{:>16}", "0.25")
        );
    }

    #[test]
    fn test_buy_updates_portfolio() {
        let mut portfolio = Portfolio::new(100.0);
        let fill = buy(&mut portfolio, 12.0, 8, 4, false).unwrap();
        assert_eq!(fill.side, TradeSide::Buy);
        assert_eq!(fill.notional(), 96.0);
        assert_eq!(portfolio.cash, 4.0);
        assert_eq!(portfolio.shares, 8);
    }

    #[test]
    fn test_buy_rejections_are_noops() {
        let mut portfolio = Portfolio::new(100.0);
        assert!(buy(&mut portfolio, 12.0, 0, 1, false).is_none());
        assert!(buy(&mut portfolio, 12.0, 9, 1, false).is_none());
        assert_eq!(portfolio, Portfolio::new(100.0));
    }

    #[test]
    fn test_sell_updates_portfolio() {
        let mut portfolio = Portfolio {
            cash: 4.0,
            shares: 8,
        };
        let fill = sell(&mut portfolio, 6.0, 8, 6, false).unwrap();
        assert_eq!(fill.side, TradeSide::Sell);
        assert_eq!(portfolio.cash, 52.0);
        assert_eq!(portfolio.shares, 0);
    }

    #[test]
    fn test_sell_rejections_are_noops() {
        let mut portfolio = Portfolio {
            cash: 4.0,
            shares: 3,
        };
        assert!(sell(&mut portfolio, 6.0, 0, 1, false).is_none());
        assert!(sell(&mut portfolio, 6.0, 4, 1, false).is_none());
        assert_eq!(
            portfolio,
            Portfolio {
                cash: 4.0,
                shares: 3
            }
        );
    }
}
