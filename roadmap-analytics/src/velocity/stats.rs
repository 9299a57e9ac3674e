//! Windowed descriptive statistics for velocity series.

/// Mean of the first `window` values (series is most recent first).
/// Shorter series use every value they have.
pub fn rolling_mean(series: &[f64], window: usize) -> f64 {
    let take = series.len().min(window);
    if take == 0 {
        return 0.0;
    }
    series[..take].iter().sum::<f64>() / take as f64
}

/// Population standard deviation of `values`.
/// A single data point has no spread; returns 0.0.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if !variance.is_finite() || variance <= 0.0 {
        return 0.0;
    }
    variance.sqrt()
}

/// Median of `values` via linear interpolation between the middle ranks.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    percentile(&sorted, 50.0)
}

/// Linear-interpolated percentile over pre-sorted data.
///
/// `sorted`: ascending values. `p`: percentile in [0, 100].
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let frac = rank - lower as f64;
    sorted[lower] * (1.0 - frac) + sorted[upper] * frac
}
