use std::sync::Arc;

use chrono::{Duration, Utc};
use langmet_core::config::{Args, ServiceConfig};
use langmet_core::events::{CompletionEvent, WindowedObservation};
use langmet_core::{
    detect_categorical_drift, detect_numeric_drift, detect_numeric_drift_windowed,
    CategoricalDriftOptions, DriftStatus, MemoryEventStore, MetricKind, MetricsService,
    NumericDriftOptions, WindowOptions,
};

#[test]
fn test_shifted_sample_is_flagged() {
    // Baseline clustered near 120, current near 210: PSI over shared bins
    // must be large and flagged at the 0.2 threshold.
    let baseline = [120.0, 130.0, 115.0, 125.0];
    let current = [210.0, 220.0, 205.0, 215.0];
    let result =
        detect_numeric_drift(&baseline, &current, &NumericDriftOptions::default()).unwrap();

    assert_eq!(result.metric_kind, MetricKind::Numeric);
    assert_eq!(result.status, DriftStatus::Ok);
    assert!(result.score > 0.5, "expected large PSI, got {}", result.score);
    assert!(result.flagged);
}

#[test]
fn test_identical_samples_are_not_flagged() {
    let sample = [5.0, 6.0, 7.0, 8.0, 9.0];
    let result = detect_numeric_drift(&sample, &sample, &NumericDriftOptions::default()).unwrap();
    assert!(result.score.abs() < 1e-9);
    assert!(!result.flagged);
}

#[test]
fn test_numeric_drift_never_raises_on_empty_input() {
    let options = NumericDriftOptions::default();
    for (baseline, current) in [(&[][..], &[][..]), (&[1.0][..], &[][..]), (&[][..], &[1.0][..])] {
        let result = detect_numeric_drift(baseline, current, &options).unwrap();
        assert_eq!(result.status, DriftStatus::InsufficientData);
        assert!(!result.flagged);
    }
}

#[test]
fn test_partially_overlapping_labels() {
    // Same label support, different proportions: TVD strictly inside (0, 1).
    let baseline = ["openai", "openai", "anthropic"];
    let current = ["anthropic", "anthropic", "openai"];
    let result =
        detect_categorical_drift(&baseline, &current, &CategoricalDriftOptions::default());

    assert_eq!(result.metric_kind, MetricKind::Categorical);
    assert_eq!(result.status, DriftStatus::Ok);
    assert!(result.score > 0.0 && result.score < 1.0);
    assert!((result.score - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_categorical_drift_empty_side_is_insufficient() {
    let empty: [&str; 0] = [];
    let result =
        detect_categorical_drift(&["a"], &empty, &CategoricalDriftOptions::default());
    assert_eq!(result.status, DriftStatus::InsufficientData);
}

#[test]
fn test_sparse_observations_are_insufficient() {
    // Two observations against min_samples_per_window = 20: no PSI,
    // regardless of the values.
    let reference = Utc::now();
    let observations = vec![
        WindowedObservation::new(reference - Duration::hours(2), 1000.0),
        WindowedObservation::new(reference - Duration::minutes(40), 5.0),
    ];
    let result =
        detect_numeric_drift_windowed(&observations, reference, &WindowOptions::default())
            .unwrap();
    assert_eq!(result.status, DriftStatus::InsufficientData);
    assert_eq!(result.baseline_size, 1);
    assert_eq!(result.current_size, 1);
    assert!(!result.flagged);
}

#[test]
fn test_windowed_split_is_disjoint_and_contiguous() {
    let reference = Utc::now();
    let options = WindowOptions {
        current_window: Duration::hours(1),
        baseline_window: Duration::hours(4),
        min_samples_per_window: 1,
        numeric: NumericDriftOptions::default(),
    };

    // One observation per 10 minutes across 5 hours, value = minutes ago.
    let observations: Vec<_> = (0..30)
        .map(|i| {
            let minutes = i * 10;
            WindowedObservation::new(
                reference - Duration::minutes(minutes),
                minutes as f64,
            )
        })
        .collect();

    let result = detect_numeric_drift_windowed(&observations, reference, &options).unwrap();
    // 0..=60 minutes ago inclusive is current (7 points), (60, 240] is
    // baseline (18 points), the rest fall outside the lookback. Nothing is
    // double counted.
    assert_eq!(result.current_size, 7);
    assert_eq!(result.baseline_size, 18);
    assert_eq!(result.current_size + result.baseline_size, 25);
}

#[test]
fn test_windowed_drift_detects_level_shift() {
    let reference = Utc::now();
    let options = WindowOptions {
        current_window: Duration::hours(1),
        baseline_window: Duration::days(1),
        min_samples_per_window: 20,
        numeric: NumericDriftOptions::default(),
    };

    let mut observations = Vec::new();
    // Steady baseline around 100ms.
    for i in 0..100 {
        observations.push(WindowedObservation::new(
            reference - Duration::hours(2) - Duration::minutes(i * 10),
            100.0 + (i % 7) as f64,
        ));
    }
    // Regressed current window around 400ms.
    for i in 0..30 {
        observations.push(WindowedObservation::new(
            reference - Duration::minutes(i),
            400.0 + (i % 5) as f64,
        ));
    }

    let result = detect_numeric_drift_windowed(&observations, reference, &options).unwrap();
    assert_eq!(result.status, DriftStatus::Ok);
    assert!(result.flagged, "PSI {} should flag a 4x latency shift", result.score);
}

fn seeded_store() -> MemoryEventStore {
    let mut store = MemoryEventStore::new();
    let now = Utc::now();
    // A day of baseline traffic plus a shifted recent window.
    for i in 0..100 {
        store.push_completion(CompletionEvent {
            provider: "openai".to_string(),
            model: Some("gpt-4o".to_string()),
            latency_ms: Some(100.0 + (i % 10) as f64),
            tokens_total: Some(200),
            error_message: None,
            created_at: now - Duration::hours(2) - Duration::minutes(i * 10),
        });
    }
    for i in 0..30 {
        store.push_completion(CompletionEvent {
            provider: "anthropic".to_string(),
            model: Some("claude".to_string()),
            latency_ms: Some(500.0 + (i % 10) as f64),
            tokens_total: Some(200),
            error_message: if i % 10 == 0 { Some("overloaded".to_string()) } else { None },
            created_at: now - Duration::minutes(i),
        });
    }
    store
}

fn test_config() -> ServiceConfig {
    ServiceConfig::load(&Args::default()).unwrap()
}

#[tokio::test]
async fn test_service_latency_drift_end_to_end() {
    let service = MetricsService::new(Arc::new(seeded_store()), test_config());
    let result = service.latency_drift(None).await.unwrap();
    assert_eq!(result.status, DriftStatus::Ok);
    assert!(result.flagged, "PSI {} should flag the latency shift", result.score);
}

#[tokio::test]
async fn test_service_provider_drift_end_to_end() {
    let service = MetricsService::new(Arc::new(seeded_store()), test_config());
    let result = service.provider_drift(None).await.unwrap();
    assert_eq!(result.status, DriftStatus::Ok);
    // Traffic moved wholly from openai to anthropic.
    assert!((result.score - 1.0).abs() < 1e-9);
    assert!(result.flagged);
}

#[tokio::test]
async fn test_snapshot_payload_keys_are_stable() {
    let service = MetricsService::new(Arc::new(seeded_store()), test_config());
    let snapshot = service.snapshot(None, None).await.unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();

    // Downstream consumers depend on these exact paths.
    assert!(json["operational"]["overview"]["count"].is_u64());
    assert!(json["operational"]["overview"]["error_rate"].is_number());
    assert!(json["rag"]["overview"]["count"].is_u64());
    assert!(json["citation_coverage"]["overview"]["coverage_rate"].is_number());
}

#[tokio::test]
async fn test_snapshot_rejects_inverted_range() {
    let service = MetricsService::new(Arc::new(MemoryEventStore::new()), test_config());
    let now = Utc::now();
    let result = service.snapshot(Some(now), Some(now - Duration::hours(1))).await;
    assert!(result.is_err());
}
