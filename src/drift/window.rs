//! Windowed drift detection over a single timestamped series.

use chrono::{DateTime, Duration, Utc};

use super::numeric::{detect_numeric_drift, NumericDriftOptions};
use super::{DriftResult, MetricKind};
use crate::error::{Error, Result};
use crate::events::WindowedObservation;

/// Baseline/current split policy plus the numeric detector tunables.
#[derive(Debug, Clone, Copy)]
pub struct WindowOptions {
    /// Length of the current (most recent) window.
    pub current_window: Duration,
    /// Length of the full lookback; the baseline covers the part of it that
    /// precedes the current window.
    pub baseline_window: Duration,
    /// Minimum observations required in each window before PSI is computed.
    pub min_samples_per_window: usize,
    pub numeric: NumericDriftOptions,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            current_window: Duration::hours(1),
            baseline_window: Duration::days(7),
            min_samples_per_window: 20,
            numeric: NumericDriftOptions::default(),
        }
    }
}

/// Splits `observations` around `reference_time` into a baseline subsample
/// over `[reference_time − baseline_window, reference_time − current_window)`
/// and a current subsample over `[reference_time − current_window,
/// reference_time]`, then delegates to the numeric PSI detector.
///
/// The two windows are disjoint and contiguous: an observation exactly on
/// the inner boundary belongs to the current window, and observations older
/// than the baseline window (or newer than `reference_time`) are dropped.
/// Either window below `min_samples_per_window` yields
/// `DriftStatus::InsufficientData` without computing PSI.
pub fn detect_numeric_drift_windowed(
    observations: &[WindowedObservation],
    reference_time: DateTime<Utc>,
    options: &WindowOptions,
) -> Result<DriftResult> {
    if options.current_window <= Duration::zero() {
        return Err(Error::InvalidConfig(
            "current window must be a positive duration".into(),
        ));
    }
    if options.baseline_window <= options.current_window {
        return Err(Error::InvalidConfig(format!(
            "baseline window ({}s) must be longer than current window ({}s)",
            options.baseline_window.num_seconds(),
            options.current_window.num_seconds()
        )));
    }

    let current_start = reference_time - options.current_window;
    let baseline_start = reference_time - options.baseline_window;

    let mut baseline = Vec::new();
    let mut current = Vec::new();
    for obs in observations {
        if obs.created_at >= current_start && obs.created_at <= reference_time {
            current.push(obs.value);
        } else if obs.created_at >= baseline_start && obs.created_at < current_start {
            baseline.push(obs.value);
        }
    }

    if baseline.len() < options.min_samples_per_window
        || current.len() < options.min_samples_per_window
    {
        return Ok(DriftResult::insufficient_data(
            MetricKind::Numeric,
            baseline.len(),
            current.len(),
        ));
    }

    detect_numeric_drift(&baseline, &current, &options.numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::DriftStatus;

    fn obs_minutes_ago(reference: DateTime<Utc>, minutes: i64, value: f64) -> WindowedObservation {
        WindowedObservation::new(reference - Duration::minutes(minutes), value)
    }

    #[test]
    fn test_boundary_observation_lands_in_current_only() {
        let reference = Utc::now();
        let options = WindowOptions {
            current_window: Duration::hours(1),
            baseline_window: Duration::hours(3),
            min_samples_per_window: 1,
            numeric: NumericDriftOptions::default(),
        };
        // Exactly on the inner boundary, plus one clearly inside each window.
        let observations = vec![
            obs_minutes_ago(reference, 60, 1.0),
            obs_minutes_ago(reference, 30, 2.0),
            obs_minutes_ago(reference, 90, 3.0),
        ];
        let result = detect_numeric_drift_windowed(&observations, reference, &options).unwrap();
        assert_eq!(result.current_size, 2);
        assert_eq!(result.baseline_size, 1);
    }

    #[test]
    fn test_stale_and_future_observations_are_dropped() {
        let reference = Utc::now();
        let options = WindowOptions {
            current_window: Duration::hours(1),
            baseline_window: Duration::hours(3),
            min_samples_per_window: 1,
            numeric: NumericDriftOptions::default(),
        };
        let observations = vec![
            obs_minutes_ago(reference, 600, 1.0),  // older than the lookback
            obs_minutes_ago(reference, -10, 2.0),  // after the reference time
            obs_minutes_ago(reference, 30, 3.0),
            obs_minutes_ago(reference, 120, 4.0),
        ];
        let result = detect_numeric_drift_windowed(&observations, reference, &options).unwrap();
        assert_eq!(result.current_size, 1);
        assert_eq!(result.baseline_size, 1);
    }

    #[test]
    fn test_inverted_windows_are_invalid() {
        let options = WindowOptions {
            current_window: Duration::hours(2),
            baseline_window: Duration::hours(1),
            ..Default::default()
        };
        assert!(detect_numeric_drift_windowed(&[], Utc::now(), &options).is_err());
    }
}
