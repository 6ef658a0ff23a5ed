//! Retrieval-quality metrics over RAG events.

use serde::{Deserialize, Serialize};

use super::LatencySummary;
use crate::events::RagEvent;
use crate::stats;

/// Mean plus the percentile grid over flattened score arrays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub mean: f64,
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

impl ScoreSummary {
    fn from_samples(samples: &[f64]) -> Option<Self> {
        Some(Self {
            mean: stats::mean(samples)?,
            p50: stats::percentile(samples, 50.0).ok()?,
            p90: stats::percentile(samples, 90.0).ok()?,
            p95: stats::percentile(samples, 95.0).ok()?,
            p99: stats::percentile(samples, 99.0).ok()?,
        })
    }
}

/// Score and latency summaries for one phase (retrieval or rerank),
/// computed independently of the other phase. Each field is omitted when
/// that phase produced no samples.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhaseOverview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<LatencySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagOverview {
    pub count: usize,
    pub retrieval: PhaseOverview,
    pub rerank: PhaseOverview,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagMetrics {
    pub overview: RagOverview,
}

/// Computes score and latency summaries for the retrieval and rerank phases
/// of a batch of RAG events. Missing score arrays are treated as empty.
pub fn compute_rag_metrics(events: &[RagEvent]) -> RagMetrics {
    let mut retrieval_scores = Vec::new();
    let mut rerank_scores = Vec::new();
    let mut retrieval_latencies = Vec::new();
    let mut rerank_latencies = Vec::new();

    for event in events {
        retrieval_scores.extend_from_slice(&event.retrieval_scores);
        rerank_scores.extend_from_slice(&event.rerank_scores);
        if let Some(latency) = event.retrieval_latency_ms {
            retrieval_latencies.push(latency);
        }
        if let Some(latency) = event.rerank_latency_ms {
            rerank_latencies.push(latency);
        }
    }

    RagMetrics {
        overview: RagOverview {
            count: events.len(),
            retrieval: PhaseOverview {
                scores: ScoreSummary::from_samples(&retrieval_scores),
                latency_ms: LatencySummary::from_samples(&retrieval_latencies),
            },
            rerank: PhaseOverview {
                scores: ScoreSummary::from_samples(&rerank_scores),
                latency_ms: LatencySummary::from_samples(&rerank_latencies),
            },
        },
    }
}
