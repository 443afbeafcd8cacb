//! Cluster (CDS) resource decoding.
//!
//! Turns `envoy.config.cluster.v3.Cluster` payloads into [`ClusterResource`]
//! values for the routing layer. Only discovery type, load balancing policy,
//! the EDS service name and inline endpoints are read; circuit breaking and
//! outlier detection are not.

use std::fmt;

use prost::Message;
use serde::{Serialize, Serializer};
use xds_core::{DecodeFailure, ResourceDecoder, TypeUrl, XdsError};
use xds_types::envoy::config::cluster::v3::{cluster, Cluster};

use super::endpoint::{decode_load_assignment, EndpointSet};

/// How the endpoints of a cluster are discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClusterDiscoveryType {
    /// Endpoints come from EDS.
    #[default]
    Eds,
    /// A single DNS name resolved lazily.
    LogicalDns,
    /// Endpoints are listed in the cluster itself.
    Static,
}

impl ClusterDiscoveryType {
    /// Map a wire value. Anything other than EDS, LOGICAL_DNS or STATIC
    /// becomes [`Eds`](Self::Eds).
    #[must_use]
    pub fn from_wire(raw: i32) -> Self {
        match cluster::DiscoveryType::try_from(raw) {
            Ok(cluster::DiscoveryType::Eds) => Self::Eds,
            Ok(cluster::DiscoveryType::LogicalDns) => Self::LogicalDns,
            Ok(cluster::DiscoveryType::Static) => Self::Static,
            _ => Self::Eds,
        }
    }

    /// Map the cluster's discovery oneof. When the oneof is unset or holds a
    /// custom cluster type, the `type` field reads as its proto default
    /// `STATIC`.
    fn from_cluster(c: &Cluster) -> Self {
        match &c.cluster_discovery_type {
            Some(cluster::ClusterDiscoveryType::Type(raw)) => Self::from_wire(*raw),
            Some(cluster::ClusterDiscoveryType::ClusterType(_)) | None => Self::Static,
        }
    }

    /// Name used in dumps and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eds => "EDS",
            Self::LogicalDns => "LOGICAL_DNS",
            Self::Static => "Static",
        }
    }
}

impl fmt::Display for ClusterDiscoveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load balancing policy of a cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClusterLbPolicy {
    /// Round robin.
    #[default]
    RoundRobin,
    /// Consistent hashing.
    RingHash,
}

impl ClusterLbPolicy {
    /// Map a wire value. Anything other than RING_HASH becomes
    /// [`RoundRobin`](Self::RoundRobin).
    #[must_use]
    pub fn from_wire(raw: i32) -> Self {
        match cluster::LbPolicy::try_from(raw) {
            Ok(cluster::LbPolicy::RoundRobin) => Self::RoundRobin,
            Ok(cluster::LbPolicy::RingHash) => Self::RingHash,
            _ => Self::RoundRobin,
        }
    }

    /// Name used in dumps and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin => "roundrobin",
            Self::RingHash => "ringhash",
        }
    }
}

impl fmt::Display for ClusterLbPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded cluster.
///
/// Serializes as
/// `{"discovery_type": "EDS", "lb_policy": "roundrobin", "endpoint_name": "...", "meta": {...}}`
/// with `meta` present only for inline endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterResource {
    /// Discovery type.
    #[serde(serialize_with = "display")]
    pub discovery_type: ClusterDiscoveryType,
    /// Load balancing policy.
    #[serde(serialize_with = "display")]
    pub lb_policy: ClusterLbPolicy,
    /// Name to look endpoints up under.
    pub endpoint_name: String,
    /// Endpoints embedded in the cluster, if any.
    #[serde(rename = "meta", skip_serializing_if = "Option::is_none")]
    pub inline_endpoints: Option<EndpointSet>,
}

impl ClusterResource {
    /// Endpoints carried by the cluster itself, so no EDS lookup is needed.
    #[must_use]
    pub fn inline_eds(&self) -> Option<&EndpointSet> {
        self.inline_endpoints.as_ref()
    }
}

fn display<T: fmt::Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Decoder for CDS payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterDecoder;

impl ResourceDecoder for ClusterDecoder {
    type Output = ClusterResource;

    fn type_url(&self) -> &'static str {
        TypeUrl::CLUSTER
    }

    fn decode(&self, any: &prost_types::Any) -> Result<(String, ClusterResource), DecodeFailure> {
        self.check_type(any)?;

        let c = Cluster::decode(any.value.as_slice()).map_err(|source| {
            DecodeFailure::anonymous(XdsError::MalformedPayload {
                type_url: any.type_url.clone(),
                source,
            })
        })?;

        let endpoint_name = c
            .eds_cluster_config
            .as_ref()
            .map(|eds| eds.service_name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(c.name.as_str())
            .to_string();

        // An assignment without any endpoint is a placeholder, not inline EDS
        let inline_endpoints = c
            .load_assignment
            .as_ref()
            .filter(|cla| cla.endpoints.iter().any(|g| !g.lb_endpoints.is_empty()))
            .map(decode_load_assignment)
            .transpose()
            .map_err(|e| DecodeFailure::named(&c.name, XdsError::inline_endpoints(&c.name, e)))?;

        let resource = ClusterResource {
            discovery_type: ClusterDiscoveryType::from_cluster(&c),
            lb_policy: ClusterLbPolicy::from_wire(c.lb_policy),
            endpoint_name,
            inline_endpoints,
        };
        Ok((c.name, resource))
    }
}

/// Decode a single CDS payload.
pub fn decode_cluster(any: &prost_types::Any) -> Result<(String, ClusterResource), DecodeFailure> {
    ClusterDecoder.decode(any)
}
