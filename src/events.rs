//! Telemetry event records consumed by the aggregators and drift detectors.
//!
//! All events are immutable value records constructed by the caller from
//! pipeline telemetry. The engine reads them and holds no state across calls.
//!
//! Timestamps deserialize from either an RFC 3339 string or a bare number,
//! where a number is interpreted as seconds before the moment of parsing.
//! The relative form is what exported event batches carry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

fn flexible_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Absolute(DateTime<Utc>),
        SecondsAgo(f64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Absolute(ts) => Ok(ts),
        Raw::SecondsAgo(secs) => Ok(Utc::now() - Duration::milliseconds((secs * 1000.0) as i64)),
    }
}

/// One LLM completion call.
///
/// `error_message` being absent means the call succeeded. Events without a
/// latency are excluded from latency aggregates but still count toward the
/// error rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub latency_ms: Option<f64>,
    #[serde(default)]
    pub tokens_total: Option<u64>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(deserialize_with = "flexible_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl CompletionEvent {
    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }
}

/// One retrieval/rerank round trip.
///
/// Score arrays missing from the wire deserialize as empty, not as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagEvent {
    #[serde(default)]
    pub top_k: Option<u32>,
    #[serde(default)]
    pub top_n: Option<u32>,
    #[serde(default)]
    pub retrieval_scores: Vec<f64>,
    #[serde(default)]
    pub rerank_scores: Vec<f64>,
    #[serde(default)]
    pub retrieval_latency_ms: Option<f64>,
    #[serde(default)]
    pub rerank_latency_ms: Option<f64>,
    #[serde(deserialize_with = "flexible_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Citation evidence attached to one generated message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationEvent {
    pub message_id: String,
    pub evidence_count: u64,
    #[serde(deserialize_with = "flexible_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A single timestamped value, the unit the window splitter consumes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowedObservation {
    #[serde(deserialize_with = "flexible_timestamp")]
    pub created_at: DateTime<Utc>,
    pub value: f64,
}

impl WindowedObservation {
    pub fn new(created_at: DateTime<Utc>, value: f64) -> Self {
        Self { created_at, value }
    }
}

/// A batch of events of all three kinds, as exported to JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventBatch {
    #[serde(default)]
    pub completion_events: Vec<CompletionEvent>,
    #[serde(default)]
    pub rag_events: Vec<RagEvent>,
    #[serde(default)]
    pub citation_events: Vec<CitationEvent>,
}
