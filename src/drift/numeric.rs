//! Numeric drift via the Population Stability Index.

use serde::{Deserialize, Serialize};

use super::{DriftResult, MetricKind};
use crate::error::{Error, Result};
use crate::stats;

/// Tunables for the PSI detector. Defaults follow the common monitoring
/// convention: 10 bins, 1e-4 smoothing floor, 0.2 flag threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NumericDriftOptions {
    /// Number of equal-width bins over the combined sample range.
    pub bin_count: usize,
    /// Smoothing floor applied to each bin proportion so the log ratio
    /// stays defined when a bin is empty on one side.
    pub epsilon: f64,
    /// PSI above this sets `flagged`.
    pub threshold: f64,
    /// Minimum size of each sample before a score is computed.
    pub min_samples: usize,
}

impl Default for NumericDriftOptions {
    fn default() -> Self {
        Self {
            bin_count: 10,
            epsilon: 1e-4,
            threshold: 0.2,
            min_samples: 1,
        }
    }
}

/// Compares `current` against `baseline` with PSI over bins spanning the
/// combined range of both samples.
///
/// PSI = Σ over bins of (current_pct − baseline_pct) · ln(current_pct /
/// baseline_pct), with `baseline` always the reference distribution in the
/// denominator; swapping the arguments changes the score. A degenerate
/// range (all values identical) collapses to a single bin and scores 0.
///
/// Samples below `min_samples` (either side) yield
/// `DriftStatus::InsufficientData` instead of a score. An empty sample is
/// never enough, regardless of `min_samples`.
pub fn detect_numeric_drift(
    baseline: &[f64],
    current: &[f64],
    options: &NumericDriftOptions,
) -> Result<DriftResult> {
    if options.bin_count == 0 {
        return Err(Error::InvalidConfig("bin_count must be positive".into()));
    }
    if options.epsilon <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "epsilon must be positive, got {}",
            options.epsilon
        )));
    }

    let min_samples = options.min_samples.max(1);
    if baseline.len() < min_samples || current.len() < min_samples {
        return Ok(DriftResult::insufficient_data(
            MetricKind::Numeric,
            baseline.len(),
            current.len(),
        ));
    }

    // Guard above ensures both samples are non-empty, so a range exists;
    // the fallback degenerates to the single-bin zero-score path.
    let (min, max) = stats::combined_range(baseline, current).unwrap_or((0.0, 0.0));

    let score = if max <= min {
        0.0
    } else {
        let baseline_counts = stats::histogram_bins(baseline, min, max, options.bin_count);
        let current_counts = stats::histogram_bins(current, min, max, options.bin_count);
        psi(
            &baseline_counts,
            baseline.len(),
            &current_counts,
            current.len(),
            options.epsilon,
        )
    };

    Ok(DriftResult::scored(
        MetricKind::Numeric,
        score,
        baseline.len(),
        current.len(),
        options.threshold,
    ))
}

fn psi(
    baseline_counts: &[usize],
    baseline_total: usize,
    current_counts: &[usize],
    current_total: usize,
    epsilon: f64,
) -> f64 {
    baseline_counts
        .iter()
        .zip(current_counts)
        .map(|(&base, &cur)| {
            let base_pct = (base as f64 / baseline_total as f64).max(epsilon);
            let cur_pct = (cur as f64 / current_total as f64).max(epsilon);
            (cur_pct - base_pct) * (cur_pct / base_pct).ln()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::DriftStatus;

    #[test]
    fn test_identical_samples_score_zero() {
        let sample = [1.0, 2.0, 3.0, 4.0, 5.0];
        for bin_count in [1, 2, 10] {
            let options = NumericDriftOptions {
                bin_count,
                ..Default::default()
            };
            let result = detect_numeric_drift(&sample, &sample, &options).unwrap();
            assert_eq!(result.status, DriftStatus::Ok);
            assert!(result.score.abs() < 1e-9, "bins={}: {}", bin_count, result.score);
            assert!(!result.flagged);
        }
    }

    #[test]
    fn test_degenerate_range_scores_zero() {
        let options = NumericDriftOptions::default();
        let result = detect_numeric_drift(&[5.0, 5.0], &[5.0, 5.0, 5.0], &options).unwrap();
        assert_eq!(result.status, DriftStatus::Ok);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_empty_sample_is_insufficient_not_an_error() {
        let options = NumericDriftOptions::default();
        let result = detect_numeric_drift(&[], &[1.0], &options).unwrap();
        assert_eq!(result.status, DriftStatus::InsufficientData);
        assert!(!result.flagged);
        assert_eq!(result.baseline_size, 0);
        assert_eq!(result.current_size, 1);
    }

    #[test]
    fn test_zero_bin_count_is_invalid() {
        let options = NumericDriftOptions {
            bin_count: 0,
            ..Default::default()
        };
        assert!(detect_numeric_drift(&[1.0], &[1.0], &options).is_err());
    }

    #[test]
    fn test_min_samples_guard() {
        let options = NumericDriftOptions {
            min_samples: 5,
            ..Default::default()
        };
        let result = detect_numeric_drift(&[1.0, 2.0, 3.0], &[4.0; 8], &options).unwrap();
        assert_eq!(result.status, DriftStatus::InsufficientData);
    }
}
