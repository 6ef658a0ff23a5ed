//! Statistical primitives shared by the aggregators and drift detectors.
//!
//! Everything here is a pure, single-pass (or sort-then-index) computation
//! over caller-supplied slices. No state is held between calls.

use crate::error::{Error, Result};

/// Returns the value at percentile `p` using linear interpolation between
/// closest ranks: the rank is `p / 100 * (n - 1)` over the sorted values,
/// and fractional ranks interpolate between the two neighboring values.
///
/// `p` must be within `[0, 100]`; `values` must be non-empty.
pub fn percentile(values: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&p) {
        return Err(Error::InvalidConfig(format!(
            "percentile must be within [0, 100], got {}",
            p
        )));
    }
    if values.is_empty() {
        return Err(Error::EmptyInput("percentile"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Ok(sorted[lower]);
    }
    let weight = rank - lower as f64;
    Ok(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Arithmetic mean, or `None` for an empty slice so aggregators can omit
/// the metric instead of fabricating a zero.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// `count / total`, defined as 0.0 when `total` is zero. Empty cohorts must
/// not crash dashboards.
pub fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// Counts `values` into `bin_count` equal-width bins spanning `[min, max]`.
///
/// The range is supplied by the caller so that two samples can be binned
/// over their shared support. Values at or beyond `max` land in the last
/// bin. A degenerate range (`min == max`) collapses to a single bin holding
/// every value.
pub fn histogram_bins(values: &[f64], min: f64, max: f64, bin_count: usize) -> Vec<usize> {
    if bin_count <= 1 || max <= min {
        return vec![values.len()];
    }

    let bin_width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &value in values {
        let bin = ((value - min) / bin_width).floor() as usize;
        counts[bin.min(bin_count - 1)] += 1;
    }
    counts
}

/// Combined `(min, max)` over both slices, ignoring nothing: every value
/// participates in the shared range.
pub fn combined_range(a: &[f64], b: &[f64]) -> Option<(f64, f64)> {
    let mut iter = a.iter().chain(b.iter()).copied();
    let first = iter.next()?;
    let (mut min, mut max) = (first, first);
    for value in iter {
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }
    Some((min, max))
}
