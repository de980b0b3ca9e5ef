use crate::error::IndicatorError;

/// Trailing simple moving average.
///
/// Element `i` is the mean of `prices[i..i + window_length]`, i.e. the window that ends
/// just before the price at `i + window_length`. The result has `prices.len() - window_length`
/// elements and is empty when the window does not fit in the series.
pub fn moving_average(prices: &[f64], window_length: usize) -> Result<Vec<f64>, IndicatorError> {
    if window_length == 0 {
        return Err(IndicatorError::ZeroWindow);
    }
    if window_length >= prices.len() {
        return Ok(Vec::new());
    }

    let output_len = prices.len() - window_length;
    let mut ma_values = Vec::with_capacity(output_len);
    for window in prices.windows(window_length).take(output_len) {
        let sum: f64 = window.iter().sum();
        ma_values.push(sum / window_length as f64);
    }

    Ok(ma_values)
}
