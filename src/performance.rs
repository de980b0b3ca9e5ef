use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::cmp::Ordering;

/// Distribution summary of per-trial return rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatistics {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub profitable_trials: usize,
    pub losing_trials: usize,
}

/// Equal-width bins; `edges` has one more element than `counts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

pub struct PerformanceCalculator;

impl PerformanceCalculator {
    pub fn summarize(return_rates: &[f64]) -> ReturnStatistics {
        let count = return_rates.len();
        let mean = if count > 0 {
            return_rates.mean()
        } else {
            0.0
        };
        let std_dev = if count > 1 {
            return_rates.std_dev()
        } else {
            0.0
        };
        let min = if count > 0 {
            return_rates.iter().copied().fold(f64::INFINITY, f64::min)
        } else {
            0.0
        };
        let max = if count > 0 {
            return_rates.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        } else {
            0.0
        };

        ReturnStatistics {
            count,
            mean,
            std_dev,
            min,
            max,
            median: Self::median(return_rates),
            profitable_trials: return_rates.iter().filter(|rate| **rate > 0.0).count(),
            losing_trials: return_rates.iter().filter(|rate| **rate < 0.0).count(),
        }
    }

    fn median(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }
}

impl Histogram {
    /// Bins `values` over `[min, max]`. The last bin also holds values equal to `max`; a
    /// degenerate range is widened to `[v - 0.5, v + 0.5]`.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (mut low, mut high) = if values.is_empty() {
            (0.0, 1.0)
        } else {
            (
                values.iter().copied().fold(f64::INFINITY, f64::min),
                values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            )
        };
        if low == high {
            low -= 0.5;
            high += 0.5;
        }

        let width = (high - low) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| low + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for &value in values {
            let index = (((value - low) / width).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }

        Self { edges, counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Text rendering with return-rate bounds shown as percentages.
    pub fn render(&self, bar_width: usize) -> Vec<String> {
        let peak = self.counts.iter().copied().max().unwrap_or(0);
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let bar_len = if peak > 0 {
                    (count * bar_width + peak - 1) / peak
                } else {
                    0
                };
                format!(
                    "{:>8.2}% .. {:>8.2}% | {:<bar_width$} {}",
                    self.edges[i] * 100.0,
                    self.edges[i + 1] * 100.0,
                    "#".repeat(bar_len),
                    count,
                    bar_width = bar_width
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        let stats = PerformanceCalculator::summarize(&[-0.1, 0.0, 0.2, 0.3]);
        assert_eq!(stats.count, 4);
        assert!((stats.mean - 0.1).abs() < 1e-12);
        assert_eq!(stats.min, -0.1);
        assert_eq!(stats.max, 0.3);
        assert!((stats.median - 0.1).abs() < 1e-12);
        assert_eq!(stats.profitable_trials, 2);
        assert_eq!(stats.losing_trials, 1);
        assert!(stats.std_dev > 0.0);
    }

    #[test]
    fn test_summarize_small_inputs() {
        let empty = PerformanceCalculator::summarize(&[]);
        assert_eq!(empty.count, 0);
        assert_eq!(empty.mean, 0.0);
        assert_eq!(empty.std_dev, 0.0);

        let single = PerformanceCalculator::summarize(&[0.05]);
        assert_eq!(single.mean, 0.05);
        assert_eq!(single.median, 0.05);
        assert_eq!(single.std_dev, 0.0);
    }

    #[test]
    fn test_histogram_bins_every_value() {
        let values = [0.0, 0.1, 0.2, 0.3, 0.4, 1.0];
        let histogram = Histogram::from_values(&values, 5);
        assert_eq!(histogram.edges.len(), 6);
        assert_eq!(histogram.edges[0], 0.0);
        assert_eq!(histogram.edges[5], 1.0);
        assert_eq!(histogram.total(), values.len());
        assert_eq!(histogram.counts[4], 1);
    }

    #[test]
    fn test_histogram_degenerate_range() {
        let histogram = Histogram::from_values(&[0.0, 0.0, 0.0], 4);
        assert_eq!(histogram.edges[0], -0.5);
        assert_eq!(histogram.edges[4], 0.5);
        assert_eq!(histogram.counts, vec![0, 0, 3, 0]);
    }

    #[test]
    fn test_render_scales_to_peak() {
        let histogram = Histogram {
            edges: vec![0.0, 0.1, 0.2],
            counts: vec![2, 4],
        };
        let lines = histogram.render(10);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(&format!("{:<10} 2", "#####")));
        assert!(lines[1].ends_with(&format!("{} 4", "#".repeat(10))));
    }
}
