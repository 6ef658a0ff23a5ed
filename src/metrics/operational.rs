//! Operational metrics over LLM completion events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::LatencySummary;
use crate::events::CompletionEvent;
use crate::stats;

/// Counts, error rate, and latency/token summaries for one cohort of
/// completion events. Used both for the whole batch and for
/// per-provider/per-model groups. Latency and token fields are omitted when
/// the cohort has no samples carrying them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalOverview {
    pub count: usize,
    /// Errored events over all events, 0.0 for an empty cohort.
    pub error_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_latency_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<LatencySummary>,
    /// Sum of `tokens_total` over events reporting it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    /// Mean of `tokens_total` over events reporting it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_tokens_total: Option<f64>,
}

/// Operational metrics result: whole-batch overview plus per-dimension
/// breakdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalMetrics {
    pub overview: OperationalOverview,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_provider: BTreeMap<String, OperationalOverview>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_model: BTreeMap<String, OperationalOverview>,
}

fn summarize<'a, I>(events: I) -> OperationalOverview
where
    I: IntoIterator<Item = &'a CompletionEvent>,
{
    let mut count = 0usize;
    let mut errors = 0usize;
    let mut latencies = Vec::new();
    let mut tokens = Vec::new();
    let mut token_sum = 0u64;
    for event in events {
        count += 1;
        if event.is_error() {
            errors += 1;
        }
        // Events without a latency still count toward the error rate.
        if let Some(latency) = event.latency_ms {
            latencies.push(latency);
        }
        if let Some(total) = event.tokens_total {
            token_sum += total;
            tokens.push(total as f64);
        }
    }

    OperationalOverview {
        count,
        error_rate: stats::rate(errors, count),
        avg_latency_ms: stats::mean(&latencies),
        latency_ms: LatencySummary::from_samples(&latencies),
        total_tokens: (!tokens.is_empty()).then_some(token_sum),
        avg_tokens_total: stats::mean(&tokens),
    }
}

/// Computes the operational overview and per-provider/per-model breakdowns
/// for a batch of completion events. Events without a model are excluded
/// from the model breakdown.
pub fn compute_operational_metrics(events: &[CompletionEvent]) -> OperationalMetrics {
    let mut by_provider: BTreeMap<&str, Vec<&CompletionEvent>> = BTreeMap::new();
    let mut by_model: BTreeMap<&str, Vec<&CompletionEvent>> = BTreeMap::new();
    for event in events {
        by_provider.entry(&event.provider).or_default().push(event);
        if let Some(model) = &event.model {
            by_model.entry(model).or_default().push(event);
        }
    }

    OperationalMetrics {
        overview: summarize(events),
        by_provider: by_provider
            .into_iter()
            .map(|(name, group)| (name.to_string(), summarize(group)))
            .collect(),
        by_model: by_model
            .into_iter()
            .map(|(name, group)| (name.to_string(), summarize(group)))
            .collect(),
    }
}
