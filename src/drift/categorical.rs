//! Categorical drift via Total Variation Distance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DriftResult, MetricKind};

/// Tunables for the TVD detector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategoricalDriftOptions {
    /// TVD above this sets `flagged`.
    pub threshold: f64,
}

impl Default for CategoricalDriftOptions {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

fn frequencies<S: AsRef<str>>(labels: &[S]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.as_ref()).or_insert(0) += 1;
    }
    counts
}

/// Compares label distributions with Total Variation Distance:
/// ½ · Σ over the union of labels of |current_pct − baseline_pct|,
/// always within `[0, 1]`. Labels absent from one sample contribute a zero
/// proportion there.
///
/// Either sample being empty yields `DriftStatus::InsufficientData`.
pub fn detect_categorical_drift<S: AsRef<str>>(
    baseline: &[S],
    current: &[S],
    options: &CategoricalDriftOptions,
) -> DriftResult {
    if baseline.is_empty() || current.is_empty() {
        return DriftResult::insufficient_data(
            MetricKind::Categorical,
            baseline.len(),
            current.len(),
        );
    }

    let baseline_counts = frequencies(baseline);
    let current_counts = frequencies(current);
    let baseline_total = baseline.len() as f64;
    let current_total = current.len() as f64;

    let mut labels: Vec<&str> = baseline_counts.keys().copied().collect();
    labels.extend(current_counts.keys().copied());
    labels.sort_unstable();
    labels.dedup();

    let score = 0.5
        * labels
            .iter()
            .map(|label| {
                let base_pct =
                    baseline_counts.get(label).copied().unwrap_or(0) as f64 / baseline_total;
                let cur_pct =
                    current_counts.get(label).copied().unwrap_or(0) as f64 / current_total;
                (cur_pct - base_pct).abs()
            })
            .sum::<f64>();

    DriftResult::scored(
        MetricKind::Categorical,
        score,
        baseline.len(),
        current.len(),
        options.threshold,
    )
}
