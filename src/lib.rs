//! Metrics and drift analytics engine for LLM/RAG telemetry.
//!
//! The crate turns caller-supplied batches of telemetry events into
//! operational, retrieval-quality, and citation-coverage overviews, and
//! scores distributional drift between a historical baseline and a recent
//! window (PSI for numeric samples, TVD for label samples). All engine
//! functions are pure and synchronous; fetching events is the job of an
//! [`storage::EventStore`] implementation composed in by the caller.

pub mod config;
pub mod drift;
pub mod error;
pub mod events;
pub mod metrics;
pub mod service;
pub mod stats;
pub mod storage;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use drift::{
    detect_categorical_drift, detect_numeric_drift, detect_numeric_drift_windowed,
    CategoricalDriftOptions, DriftResult, DriftStatus, MetricKind, NumericDriftOptions,
    WindowOptions,
};
pub use error::{Error, Result};
pub use events::{CitationEvent, CompletionEvent, EventBatch, RagEvent, WindowedObservation};
pub use metrics::{
    compute_citation_coverage, compute_operational_metrics, compute_rag_metrics,
    CitationCoverage, OperationalMetrics, RagMetrics,
};
pub use service::{MetricsService, MetricsSnapshot};
pub use storage::{EventStore, MemoryEventStore};
