//! Citation coverage over generated messages.

use serde::{Deserialize, Serialize};

use crate::events::CitationEvent;
use crate::stats;

/// Evidence-count distribution for a batch of citation events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageOverview {
    pub total_messages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_evidence_count: Option<f64>,
    /// Fraction of messages backed by at least one piece of evidence,
    /// 0.0 for an empty batch.
    pub coverage_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationCoverage {
    pub overview: CoverageOverview,
}

/// Computes citation coverage for a batch of citation events. Duplicate
/// message ids count as separate events; deduplication, if wanted, is the
/// caller's job.
pub fn compute_citation_coverage(events: &[CitationEvent]) -> CitationCoverage {
    let evidence_counts: Vec<f64> = events.iter().map(|e| e.evidence_count as f64).collect();
    let covered = events.iter().filter(|e| e.evidence_count > 0).count();

    CitationCoverage {
        overview: CoverageOverview {
            total_messages: events.len(),
            avg_evidence_count: stats::mean(&evidence_counts),
            coverage_rate: stats::rate(covered, events.len()),
        },
    }
}
