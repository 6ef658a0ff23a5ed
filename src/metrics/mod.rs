//! Batch aggregators turning telemetry events into metric overviews.
//!
//! This module provides the aggregation half of the engine:
//! - `operational`: latency/error/token summaries over completion events
//! - `rag`: score and latency summaries over retrieval/rerank events
//! - `citation`: evidence-count coverage over citation events
//!
//! Every aggregator is a pure function over an already-fetched batch; time
//! filtering is the caller's responsibility. Metrics with no samples are
//! omitted from the result rather than defaulted to zero, so "no data" and
//! "zero" stay distinguishable downstream.

pub mod citation;
pub mod operational;
pub mod rag;

pub use citation::{compute_citation_coverage, CitationCoverage, CoverageOverview};
pub use operational::{compute_operational_metrics, OperationalMetrics, OperationalOverview};
pub use rag::{compute_rag_metrics, PhaseOverview, RagMetrics, RagOverview, ScoreSummary};

use serde::{Deserialize, Serialize};

use crate::stats;

/// Fixed percentile grid reported for latencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

impl LatencySummary {
    /// Summarizes the samples, or `None` when there are none.
    pub(crate) fn from_samples(samples: &[f64]) -> Option<Self> {
        Some(Self {
            p50: stats::percentile(samples, 50.0).ok()?,
            p90: stats::percentile(samples, 90.0).ok()?,
            p95: stats::percentile(samples, 95.0).ok()?,
            p99: stats::percentile(samples, 99.0).ok()?,
        })
    }
}
