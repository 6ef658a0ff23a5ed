//! Event stores: the repository boundary the engine is composed with.
//!
//! This module defines the capability trait the orchestration facade fetches
//! events through. Backends are selected at composition time behind
//! `Arc<dyn EventStore>`:
//! - `memory`: in-memory store for composition roots and tests
//! - relational adapters live outside this crate and implement the same trait
//!
//! The engine itself never depends on a concrete backend; it only consumes
//! the event sequences these fetches return.

pub mod memory;

pub use memory::MemoryEventStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::events::{CitationEvent, CompletionEvent, RagEvent};

/// Time-ranged fetch operations for each event type.
///
/// Ranges are half-open `[start, end)`. Implementations decide ordering;
/// the engine does not rely on it.
#[async_trait]
pub trait EventStore: Send + Sync + 'static {
    async fn fetch_completion_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CompletionEvent>>;

    async fn fetch_rag_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RagEvent>>;

    async fn fetch_citation_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CitationEvent>>;
}
