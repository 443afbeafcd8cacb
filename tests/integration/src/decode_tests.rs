//! Cluster decoding integration tests.

use integration_tests::{eds_cluster, init_tracing, static_cluster, to_any};
use mesh_xds::prelude::*;
use mesh_xds::types::envoy::config::cluster::v3::cluster::{self, EdsClusterConfig};
use serde_json::json;

#[test]
fn decode_cds_response() {
    init_tracing();

    let mut reviews = eds_cluster("outbound|9080||reviews.bookinfo.svc.cluster.local");
    reviews.eds_cluster_config = Some(EdsClusterConfig {
        service_name: "outbound|9080||reviews.bookinfo.svc.cluster.local".to_string(),
    });
    reviews.lb_policy = cluster::LbPolicy::RingHash as i32;

    let mut passthrough = eds_cluster("PassthroughCluster");
    passthrough.cluster_discovery_type = Some(cluster::ClusterDiscoveryType::Type(
        cluster::DiscoveryType::OriginalDst as i32,
    ));

    let raw = vec![
        to_any(&reviews),
        to_any(&static_cluster("inbound|9080||", &["127.0.0.1"], 9080)),
        to_any(&passthrough),
    ];

    let (clusters, result) = unmarshal_clusters(&raw).into_parts();
    assert!(result.is_ok());
    assert_eq!(clusters.len(), 3);

    let r = &clusters["outbound|9080||reviews.bookinfo.svc.cluster.local"];
    assert_eq!(r.discovery_type, ClusterDiscoveryType::Eds);
    assert_eq!(r.lb_policy, ClusterLbPolicy::RingHash);
    assert!(r.inline_eds().is_none());

    let inbound = &clusters["inbound|9080||"];
    assert_eq!(inbound.discovery_type, ClusterDiscoveryType::Static);
    assert_eq!(inbound.endpoint_name, "inbound|9080||");
    let endpoints = inbound.inline_eds().unwrap();
    assert_eq!(endpoints.len(), 1);
    assert_eq!(
        endpoints.endpoints().next().unwrap().to_string(),
        "127.0.0.1:9080"
    );

    // Unsupported discovery types are treated as EDS
    assert_eq!(
        clusters["PassthroughCluster"].discovery_type,
        ClusterDiscoveryType::Eds
    );
}

#[test]
fn decode_dns_clusters() {
    let mut logical = static_cluster("outbound|443||www.example.com", &["www.example.com"], 443);
    logical.cluster_discovery_type = Some(cluster::ClusterDiscoveryType::Type(
        cluster::DiscoveryType::LogicalDns as i32,
    ));

    let mut aggregate = eds_cluster("aggregate");
    aggregate.cluster_discovery_type = Some(cluster::ClusterDiscoveryType::ClusterType(
        cluster::CustomClusterType {
            name: "envoy.clusters.aggregate".to_string(),
            typed_config: None,
        },
    ));

    let (clusters, result) = unmarshal_clusters(&[to_any(&logical), to_any(&aggregate)]).into_parts();
    assert!(result.is_ok());

    let dns = &clusters["outbound|443||www.example.com"];
    assert_eq!(dns.discovery_type, ClusterDiscoveryType::LogicalDns);
    let endpoint = dns.inline_eds().and_then(|set| set.endpoints().next()).unwrap();
    assert!(endpoint.is_hostname());
    assert_eq!(endpoint.to_string(), "www.example.com:443");

    // Custom cluster types leave the type field at its STATIC default
    assert_eq!(clusters["aggregate"].discovery_type, ClusterDiscoveryType::Static);
}

#[test]
fn decode_partial_failure_keeps_good_clusters() {
    init_tracing();

    let mut wrong_type = to_any(&eds_cluster("listener-in-disguise"));
    wrong_type.type_url = TypeUrl::LISTENER.to_string();

    let raw = vec![
        to_any(&eds_cluster("a")),
        to_any(&static_cluster("broken", &["10.0.0.1"], 70000)),
        wrong_type,
        prost_types::Any {
            type_url: TypeUrl::CLUSTER.to_string(),
            value: vec![0x0a, 0xff],
        },
        to_any(&eds_cluster("b")),
    ];

    let batch = unmarshal_clusters(&raw);
    assert_eq!(
        batch.resources().keys().map(String::as_str).collect::<Vec<_>>(),
        ["a", "b"]
    );

    let err = batch.error().unwrap();
    assert_eq!(err.len(), 3);
    assert_eq!(err.batch_size(), 5);
    assert_eq!(err.named().map(|(n, _)| n).collect::<Vec<_>>(), ["broken"]);
    assert_eq!(err.anonymous().count(), 2);

    let msg = err.to_string();
    assert!(msg.starts_with("3 of 5 resources failed to decode"));
    assert!(msg.contains("[broken]"));
}

#[test]
fn decode_failure_maps_to_invalid_argument() {
    let (_, result) =
        unmarshal_clusters(&[to_any(&static_cluster("broken", &["::1"], 70000))]).into_parts();
    let failure = result.unwrap_err().into_failures().remove(0);
    assert_eq!(failure.name.as_deref(), Some("broken"));

    let status: tonic::Status = failure.error.into();
    assert_eq!(status.code(), tonic::Code::InvalidArgument);
    assert!(status.message().contains("broken"));
}

#[test]
fn decoded_cluster_json() {
    let (clusters, _) = unmarshal_clusters(&[
        to_any(&eds_cluster("web")),
        to_any(&static_cluster("db", &["10.0.0.9"], 5432)),
    ])
    .into_parts();

    let web = serde_json::to_value(&clusters["web"]).unwrap();
    assert_eq!(
        web,
        json!({
            "discovery_type": "EDS",
            "lb_policy": "roundrobin",
            "endpoint_name": "web"
        })
    );

    let db = serde_json::to_value(&clusters["db"]).unwrap();
    assert_eq!(db["discovery_type"], json!("Static"));
    assert!(db.get("meta").is_some());
}

#[test]
fn decode_is_deterministic() {
    let raw: Vec<_> = ["z", "m", "a"].iter().map(|n| to_any(&eds_cluster(n))).collect();

    let first = unmarshal_clusters(&raw);
    let second = unmarshal_clusters(&raw);
    assert_eq!(first.resources(), second.resources());
    assert_eq!(
        first.resources().keys().map(String::as_str).collect::<Vec<_>>(),
        ["a", "m", "z"]
    );
}
