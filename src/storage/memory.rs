//! In-memory event store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::EventStore;
use crate::error::Result;
use crate::events::{CitationEvent, CompletionEvent, EventBatch, RagEvent};

/// Event store over in-memory vectors, filtered by `created_at` on fetch.
/// Used as the composition-time backend for pre-fetched batches and in
/// tests; it holds whatever the caller loaded it with.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    completions: Vec<CompletionEvent>,
    rag: Vec<RagEvent>,
    citations: Vec<CitationEvent>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store holding one exported batch.
    pub fn from_batch(batch: EventBatch) -> Self {
        Self {
            completions: batch.completion_events,
            rag: batch.rag_events,
            citations: batch.citation_events,
        }
    }

    pub fn push_completion(&mut self, event: CompletionEvent) {
        self.completions.push(event);
    }

    pub fn push_rag(&mut self, event: RagEvent) {
        self.rag.push(event);
    }

    pub fn push_citation(&mut self, event: CitationEvent) {
        self.citations.push(event);
    }
}

fn in_range(created_at: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    created_at >= start && created_at < end
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn fetch_completion_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CompletionEvent>> {
        Ok(self
            .completions
            .iter()
            .filter(|e| in_range(e.created_at, start, end))
            .cloned()
            .collect())
    }

    async fn fetch_rag_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RagEvent>> {
        Ok(self
            .rag
            .iter()
            .filter(|e| in_range(e.created_at, start, end))
            .cloned()
            .collect())
    }

    async fn fetch_citation_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CitationEvent>> {
        Ok(self
            .citations
            .iter()
            .filter(|e| in_range(e.created_at, start, end))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn citation(minutes_ago: i64) -> CitationEvent {
        CitationEvent {
            message_id: format!("m{}", minutes_ago),
            evidence_count: 1,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn test_fetch_filters_on_created_at() {
        let mut store = MemoryEventStore::new();
        store.push_citation(citation(10));
        store.push_citation(citation(90));

        let end = Utc::now();
        let start = end - Duration::hours(1);
        let events = store.fetch_citation_events(start, end).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message_id, "m10");
    }
}
