//! Shared fixtures for the integration tests.

use std::sync::Once;

use mesh_xds::prelude::TypeUrl;
use mesh_xds::types::envoy::config::cluster::v3::{cluster, Cluster};
use mesh_xds::types::envoy::config::core::v3::{address, socket_address, Address, SocketAddress};
use mesh_xds::types::envoy::config::endpoint::v3::{
    lb_endpoint, ClusterLoadAssignment, Endpoint, LbEndpoint, LocalityLbEndpoints,
};
use prost::Message;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test subscriber once per binary. Honors `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// An EDS cluster with round robin balancing.
pub fn eds_cluster(name: &str) -> Cluster {
    Cluster {
        name: name.to_string(),
        cluster_discovery_type: Some(cluster::ClusterDiscoveryType::Type(
            cluster::DiscoveryType::Eds as i32,
        )),
        lb_policy: cluster::LbPolicy::RoundRobin as i32,
        ..Default::default()
    }
}

/// A STATIC cluster carrying `hosts` as inline endpoints on port `port`.
pub fn static_cluster(name: &str, hosts: &[&str], port: u32) -> Cluster {
    let lb_endpoints = hosts
        .iter()
        .map(|ip| LbEndpoint {
            host_identifier: Some(lb_endpoint::HostIdentifier::Endpoint(Endpoint {
                address: Some(Address {
                    address: Some(address::Address::SocketAddress(SocketAddress {
                        address: ip.to_string(),
                        port_specifier: Some(socket_address::PortSpecifier::PortValue(port)),
                        ..Default::default()
                    })),
                }),
                ..Default::default()
            })),
            ..Default::default()
        })
        .collect();

    Cluster {
        name: name.to_string(),
        cluster_discovery_type: Some(cluster::ClusterDiscoveryType::Type(
            cluster::DiscoveryType::Static as i32,
        )),
        load_assignment: Some(ClusterLoadAssignment {
            cluster_name: name.to_string(),
            endpoints: vec![LocalityLbEndpoints {
                lb_endpoints,
                ..Default::default()
            }],
        }),
        ..Default::default()
    }
}

/// Wrap a cluster the way a CDS response carries it.
pub fn to_any(c: &Cluster) -> prost_types::Any {
    prost_types::Any {
        type_url: TypeUrl::CLUSTER.to_string(),
        value: c.encode_to_vec(),
    }
}
