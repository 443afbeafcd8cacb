//! Load tests for cluster decoding with large CDS responses.
//!
//! These tests verify the decoder holds up under mesh-sized responses:
//! - 1000+ clusters in one response
//! - Concurrent decoding from several threads
//! - Many failures in one batch
//!
//! Run with: `cargo test --package integration-tests --test load_tests -- --nocapture`

use std::thread;
use std::time::Instant;

use integration_tests::{eds_cluster, static_cluster, to_any};
use mesh_xds::prelude::*;

fn cds_response(num_clusters: usize) -> Vec<prost_types::Any> {
    (0..num_clusters)
        .map(|i| {
            let name = format!("outbound|8080||svc-{}.default.svc.cluster.local", i);
            if i % 4 == 0 {
                to_any(&static_cluster(&name, &["10.0.0.1", "10.0.0.2"], 8080))
            } else {
                to_any(&eds_cluster(&name))
            }
        })
        .collect()
}

/// Test that one response with 1000 clusters decodes completely.
#[test]
fn test_1000_clusters() {
    let raw = cds_response(1000);

    let start = Instant::now();
    let batch = unmarshal_clusters(&raw);
    let duration = start.elapsed();

    println!(
        "Decoded {} clusters in {:?} ({:.2} µs/op)",
        raw.len(),
        duration,
        duration.as_micros() as f64 / raw.len() as f64
    );

    assert!(batch.is_ok());
    assert_eq!(batch.resources().len(), 1000);
    let inline = batch
        .resources()
        .values()
        .filter(|c| c.inline_eds().is_some())
        .count();
    assert_eq!(inline, 250);
}

/// Test concurrent decoding of the same response across threads.
#[test]
fn test_concurrent_decoding() {
    let raw = cds_response(1000);
    let num_threads = 8;

    let start = Instant::now();
    let sizes: Vec<usize> = thread::scope(|s| {
        let handles: Vec<_> = (0..num_threads)
            .map(|_| s.spawn(|| unmarshal_clusters(&raw).resources().len()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("decoder thread panicked"))
            .collect()
    });
    let duration = start.elapsed();

    println!(
        "Concurrent decode: {} threads x {} clusters in {:?}",
        num_threads,
        raw.len(),
        duration
    );

    assert!(sizes.iter().all(|&n| n == 1000));
}

/// Test a response where every other payload is corrupted.
#[test]
fn test_half_failed_batch() {
    let mut raw = cds_response(1000);
    for any in raw.iter_mut().step_by(2) {
        any.value = vec![0xff; 4];
    }

    let start = Instant::now();
    let batch = unmarshal_clusters(&raw);
    let duration = start.elapsed();

    println!("Decoded half-failed batch in {:?}", duration);

    assert_eq!(batch.resources().len(), 500);
    let err = batch.error().unwrap();
    assert_eq!(err.len(), 500);
    assert_eq!(err.anonymous().count(), 500);
    assert!(err.to_string().starts_with("500 of 1000 resources failed to decode"));
}

/// Test scaling to 5000 clusters.
#[test]
fn test_5000_clusters() {
    let raw = cds_response(5000);

    let start = Instant::now();
    let (clusters, result) = unmarshal_clusters(&raw).into_parts();
    let duration = start.elapsed();

    println!(
        "Decoded {} clusters in {:?} ({:.2} µs/op)",
        raw.len(),
        duration,
        duration.as_micros() as f64 / raw.len() as f64
    );

    assert!(result.is_ok());
    assert_eq!(clusters.len(), 5000);

    // Verify random access
    for i in (0..5000).step_by(100) {
        let name = format!("outbound|8080||svc-{}.default.svc.cluster.local", i);
        assert!(clusters.contains_key(&name));
    }
}
