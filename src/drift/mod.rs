//! Distributional drift detection between a baseline and a current sample.
//!
//! Two detectors and a windowing front end:
//! - `numeric`: Population Stability Index (PSI) over shared equal-width bins
//! - `categorical`: Total Variation Distance (TVD) over the label union
//! - `window`: splits one timestamped series into baseline/current windows
//!   and delegates to the numeric detector
//!
//! Sample-size guards surface as `DriftStatus::InsufficientData`, a normal
//! result state rather than an error; callers decide alerting policy from
//! the returned score and `flagged` bit.

pub mod categorical;
pub mod numeric;
pub mod window;

pub use categorical::{detect_categorical_drift, CategoricalDriftOptions};
pub use numeric::{detect_numeric_drift, NumericDriftOptions};
pub use window::{detect_numeric_drift_windowed, WindowOptions};

use serde::{Deserialize, Serialize};

/// Which detector produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Numeric,
    Categorical,
}

/// Outcome of the sample-size guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftStatus {
    Ok,
    InsufficientData,
}

/// Scored comparison of a current sample against a baseline.
///
/// `flagged` is true only when `status` is `Ok` and the score exceeded the
/// caller-supplied threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftResult {
    pub metric_kind: MetricKind,
    pub score: f64,
    pub baseline_size: usize,
    pub current_size: usize,
    pub status: DriftStatus,
    pub flagged: bool,
}

impl DriftResult {
    /// A guard tripped; no score was computed.
    pub(crate) fn insufficient_data(
        metric_kind: MetricKind,
        baseline_size: usize,
        current_size: usize,
    ) -> Self {
        Self {
            metric_kind,
            score: 0.0,
            baseline_size,
            current_size,
            status: DriftStatus::InsufficientData,
            flagged: false,
        }
    }

    pub(crate) fn scored(
        metric_kind: MetricKind,
        score: f64,
        baseline_size: usize,
        current_size: usize,
        threshold: f64,
    ) -> Self {
        Self {
            metric_kind,
            score,
            baseline_size,
            current_size,
            status: DriftStatus::Ok,
            flagged: score > threshold,
        }
    }
}
