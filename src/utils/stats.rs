//! Summary statistics over one group of samples.

use statrs::statistics::Statistics;

/// Statistics summary for a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); 0 for a single sample.
    pub std_dev: f64,
    pub count: usize,
}

impl Stats {
    /// Distance between the worst and the best sample.
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}

/// Computes min, max, mean and standard deviation. `None` for an empty slice.
pub fn calculate_stats(data: &[f64]) -> Option<Stats> {
    if data.is_empty() {
        return None;
    }

    let count = data.len();
    let min = Statistics::min(data);
    let max = Statistics::max(data);
    let mean = Statistics::mean(data);
    // Constant groups are exactly 0; the running sum would otherwise leave rounding residue.
    let std_dev = if count < 2 || min == max { 0.0 } else { Statistics::std_dev(data) };

    Some(Stats { min, max, mean, std_dev, count })
}
