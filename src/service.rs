//! Orchestration facade composing an event store with the engine.
//!
//! The facade owns the collaborator boundary: it applies default time
//! ranges, fetches the three event streams through the `EventStore` trait,
//! and assembles the combined payload whose top-level keys
//! (`operational.overview`, `rag.overview`, `citation_coverage`) downstream
//! consumers depend on. All computation stays in the pure aggregator and
//! drift functions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ServiceConfig;
use crate::drift::{
    detect_categorical_drift, detect_numeric_drift_windowed, DriftResult,
};
use crate::error::{Error, Result};
use crate::events::WindowedObservation;
use crate::metrics::{
    compute_citation_coverage, compute_operational_metrics, compute_rag_metrics,
    CitationCoverage, OperationalMetrics, RagMetrics,
};
use crate::storage::EventStore;

/// Combined metrics payload for one time range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub operational: OperationalMetrics,
    pub rag: RagMetrics,
    pub citation_coverage: CitationCoverage,
}

/// Facade over an event store and the engine functions.
///
/// Holds no mutable state; configuration is immutable after construction
/// and every call is independent.
#[derive(Clone)]
pub struct MetricsService {
    store: Arc<dyn EventStore>,
    config: ServiceConfig,
}

impl MetricsService {
    pub fn new(store: Arc<dyn EventStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Computes the combined metrics payload over `[start, end)`.
    ///
    /// Omitted bounds default to the configured trailing lookback ending
    /// now. An inverted range is rejected before any fetch.
    pub async fn snapshot(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<MetricsSnapshot> {
        let end = end.unwrap_or_else(Utc::now);
        let start = start.unwrap_or(end - self.config.lookback());
        if start >= end {
            return Err(Error::InvalidConfig(format!(
                "snapshot range is empty: {} >= {}",
                start, end
            )));
        }

        let completions = self.store.fetch_completion_events(start, end).await?;
        let rag_events = self.store.fetch_rag_events(start, end).await?;
        let citations = self.store.fetch_citation_events(start, end).await?;
        debug!(
            completions = completions.len(),
            rag = rag_events.len(),
            citations = citations.len(),
            %start,
            %end,
            "assembling metrics snapshot"
        );

        Ok(MetricsSnapshot {
            start,
            end,
            operational: compute_operational_metrics(&completions),
            rag: compute_rag_metrics(&rag_events),
            citation_coverage: compute_citation_coverage(&citations),
        })
    }

    /// Windowed PSI over completion latencies, split around `reference_time`
    /// (now, when omitted) using the configured window policy.
    pub async fn latency_drift(
        &self,
        reference_time: Option<DateTime<Utc>>,
    ) -> Result<DriftResult> {
        let reference = reference_time.unwrap_or_else(Utc::now);
        let options = self.config.window_options();
        let start = reference - options.baseline_window;

        let completions = self.store.fetch_completion_events(start, reference).await?;
        let observations: Vec<WindowedObservation> = completions
            .iter()
            .filter_map(|e| e.latency_ms.map(|v| WindowedObservation::new(e.created_at, v)))
            .collect();
        debug!(
            observations = observations.len(),
            %reference,
            "running windowed latency drift"
        );

        detect_numeric_drift_windowed(&observations, reference, &options)
    }

    /// TVD between provider label distributions of two adjacent ranges:
    /// the configured current window against the rest of the baseline
    /// lookback before it.
    pub async fn provider_drift(
        &self,
        reference_time: Option<DateTime<Utc>>,
    ) -> Result<DriftResult> {
        let reference = reference_time.unwrap_or_else(Utc::now);
        let options = self.config.window_options();
        let split = reference - options.current_window;
        let start = reference - options.baseline_window;

        let baseline = self.store.fetch_completion_events(start, split).await?;
        let current = self.store.fetch_completion_events(split, reference).await?;
        let baseline_labels: Vec<&str> = baseline.iter().map(|e| e.provider.as_str()).collect();
        let current_labels: Vec<&str> = current.iter().map(|e| e.provider.as_str()).collect();

        Ok(detect_categorical_drift(
            &baseline_labels,
            &current_labels,
            &self.config.categorical_options(),
        ))
    }
}
