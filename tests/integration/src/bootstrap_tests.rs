//! Bootstrap integration tests.

use std::time::Duration;

use integration_tests::init_tracing;
use mesh_xds::prelude::*;
use prost_types::value::Kind;
use serde_json::json;

fn pod() -> IdentityInputs {
    IdentityInputs::new("bookinfo", "ratings-v1-7dc98c7588-x2x9q", "10.244.2.15")
}

#[test]
fn bootstrap_with_defaults() {
    init_tracing();

    let bootstrap = BootstrapConfig::new(
        &pod().control_plane_version("1.20.2"),
        XdsServerConfig::default(),
    )
    .unwrap();

    assert_eq!(
        bootstrap.node().id(),
        "sidecar~10.244.2.15~ratings-v1-7dc98c7588-x2x9q.bookinfo~bookinfo.svc.cluster.local"
    );
    assert_eq!(bootstrap.node().metadata()["ISTIO_VERSION"], json!("1.20.2"));
    assert_eq!(bootstrap.server().address, "istiod.istio-system.svc:15010");
    assert_eq!(bootstrap.server().name, "istiod.istio-system.svc");
    assert_eq!(bootstrap.server().fetch_timeout(), Duration::from_secs(1));
}

#[test]
fn bootstrap_custom_domain_and_metadata() {
    init_tracing();

    let inputs = pod()
        .domain("mesh.internal")
        .metadata(r#"{"CLUSTER_ID":"east","LABELS":{"app":"ratings"}}"#)
        .control_plane_version("1.21.0");
    let bootstrap = BootstrapConfig::new(&inputs, XdsServerConfig::new("istiod-canary:15012"))
        .unwrap();

    assert!(bootstrap.node().id().ends_with("~bookinfo.svc.mesh.internal"));
    let meta = bootstrap.node().metadata();
    assert_eq!(meta["CLUSTER_ID"], json!("east"));
    assert_eq!(meta["ISTIO_VERSION"], json!("1.21.0"));

    assert_eq!(bootstrap.server().address, "istiod-canary:15012");
    assert_eq!(bootstrap.server().name, "istiod.istio-system.svc");
}

#[test]
fn bootstrap_fills_empty_server_name() {
    let server = XdsServerConfig::new("istiod-canary:15012")
        .with_name("")
        .with_fetch_timeout(Duration::ZERO);
    let bootstrap = BootstrapConfig::new(&pod(), server).unwrap();

    assert_eq!(bootstrap.server().name, "istiod.istio-system.svc");
    assert_eq!(bootstrap.server().fetch_timeout, Duration::from_secs(1));
}

#[test]
fn bootstrap_node_proto_carries_metadata() {
    let bootstrap = BootstrapConfig::new(
        &pod().metadata(r#"{"LABELS":{"app":"ratings","version":"v1"}}"#),
        XdsServerConfig::default(),
    )
    .unwrap();

    let node = bootstrap.node_proto();
    assert_eq!(node.id, bootstrap.node().id());

    let fields = node.metadata.unwrap().fields;
    match fields["LABELS"].kind.as_ref() {
        Some(Kind::StructValue(labels)) => assert_eq!(
            labels.fields["app"].kind,
            Some(Kind::StringValue("ratings".to_string()))
        ),
        other => panic!("unexpected LABELS value: {other:?}"),
    }
}

#[test]
fn bootstrap_invalid_metadata_falls_back() {
    init_tracing();

    let bootstrap = BootstrapConfig::new(
        &pod().metadata("{not json").control_plane_version("1.20.2"),
        XdsServerConfig::default(),
    )
    .unwrap();

    let meta = bootstrap.node().metadata();
    assert_eq!(meta.len(), 1);
    assert_eq!(meta["ISTIO_VERSION"], json!("1.20.2"));
}

#[test]
fn bootstrap_missing_input_reported_first() {
    // Identity is checked before the server config
    let err = BootstrapConfig::new(
        &IdentityInputs::new("bookinfo", "", "10.244.2.15"),
        XdsServerConfig::new(""),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        XdsError::MissingIdentityInput { field: "pod_name" }
    ));
    assert!(err.is_bootstrap());
}

#[test]
fn bootstrap_empty_server_address_rejected() {
    let err = BootstrapConfig::new(&pod(), XdsServerConfig::new("")).unwrap_err();
    assert!(matches!(err, XdsError::InvalidServerConfig { .. }));
}

#[test]
fn client_options_defaults() {
    let options = ClientOptions::new()
        .server_address("istiod.istio-system.svc:15012")
        .fetch_timeout(Duration::from_millis(250))
        .build()
        .unwrap();

    assert_eq!(options.server.fetch_timeout(), Duration::from_millis(250));
    assert_eq!(
        options.dump_path.to_str(),
        Some("/tmp/xds_resource_manager.json")
    );
}
