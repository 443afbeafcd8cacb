//! Endpoint sets decoded from `ClusterLoadAssignment` messages.
//!
//! Clusters may embed their endpoints instead of referring to an EDS
//! resource. This module turns such an assignment into an [`EndpointSet`].

use std::collections::BTreeMap;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use serde::Serialize;
use xds_core::{Result, TypeUrl, XdsError};
use xds_types::envoy::config::core::v3::{address, socket_address, HealthStatus};
use xds_types::envoy::config::endpoint::v3::{lb_endpoint, ClusterLoadAssignment, LbEndpoint};

/// Filter namespace whose metadata is exposed to load balancers.
pub const LB_METADATA_NAMESPACE: &str = "envoy.lb";

/// Endpoints of a cluster, grouped by locality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointSet {
    /// Localities in the order the control plane sent them.
    pub localities: Vec<Locality>,
}

impl EndpointSet {
    /// Total number of endpoints across all localities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.localities.iter().map(|l| l.endpoints.len()).sum()
    }

    /// Whether there are no endpoints at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every endpoint.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.localities.iter().flat_map(|l| l.endpoints.iter())
    }
}

/// A group of endpoints sharing a locality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locality {
    /// `region/zone/sub_zone`.
    pub name: String,
    /// Priority, 0 is highest.
    pub priority: u32,
    /// Locality weight, at least 1.
    pub weight: u32,
    /// Endpoints in this locality.
    pub endpoints: Vec<Endpoint>,
}

/// One upstream host.
///
/// `host` is an IP literal for STATIC and EDS clusters and a DNS name for
/// LOGICAL_DNS and STRICT_DNS clusters; resolving names is left to the
/// connection layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// IP literal or DNS name.
    pub host: String,
    /// Port.
    pub port: u16,
    /// Load balancing weight, at least 1.
    pub weight: u32,
    /// Health reported by the control plane.
    pub health: EndpointHealth,
    /// Flattened `envoy.lb` metadata.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Endpoint {
    /// The socket address, if `host` is an IP literal.
    #[must_use]
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.host
            .parse::<IpAddr>()
            .ok()
            .map(|ip| SocketAddr::new(ip, self.port))
    }

    /// Whether `host` must be resolved through DNS.
    #[must_use]
    pub fn is_hostname(&self) -> bool {
        self.socket_addr().is_none()
    }
}

/// Renders `host:port`, bracketing IPv6 literals.
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.socket_addr() {
            Some(addr) => write!(f, "{addr}"),
            None => write!(f, "{}:{}", self.host, self.port),
        }
    }
}

/// Endpoint health as reported by the control plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointHealth {
    /// No health information.
    #[default]
    Unknown,
    /// Healthy.
    Healthy,
    /// Unhealthy.
    Unhealthy,
    /// Draining connections.
    Draining,
    /// Health check timed out.
    Timeout,
    /// Degraded.
    Degraded,
}

impl From<i32> for EndpointHealth {
    fn from(raw: i32) -> Self {
        match HealthStatus::try_from(raw) {
            Ok(HealthStatus::Healthy) => Self::Healthy,
            Ok(HealthStatus::Unhealthy) => Self::Unhealthy,
            Ok(HealthStatus::Draining) => Self::Draining,
            Ok(HealthStatus::Timeout) => Self::Timeout,
            Ok(HealthStatus::Degraded) => Self::Degraded,
            Ok(HealthStatus::Unknown) | Err(_) => Self::Unknown,
        }
    }
}

/// Decode a load assignment into an [`EndpointSet`].
///
/// Every endpoint must carry a socket address with a non-empty host and a
/// numeric port that fits in `u16`. The host may be an IP literal or a DNS
/// name. Missing weights default to 1.
pub fn decode_load_assignment(cla: &ClusterLoadAssignment) -> Result<EndpointSet> {
    let invalid = |reason: String| XdsError::InvalidResource {
        type_url: TypeUrl::ENDPOINT.to_string(),
        name: cla.cluster_name.clone(),
        reason,
    };

    let localities = cla
        .endpoints
        .iter()
        .map(|group| {
            let name = group
                .locality
                .as_ref()
                .map(|l| format!("{}/{}/{}", l.region, l.zone, l.sub_zone))
                .unwrap_or_default();
            let endpoints = group
                .lb_endpoints
                .iter()
                .map(|ep| decode_endpoint(ep).map_err(&invalid))
                .collect::<Result<Vec<_>>>()?;

            Ok(Locality {
                name,
                priority: group.priority,
                weight: group.load_balancing_weight.unwrap_or(1).max(1),
                endpoints,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(EndpointSet { localities })
}

fn decode_endpoint(ep: &LbEndpoint) -> std::result::Result<Endpoint, String> {
    let endpoint = match &ep.host_identifier {
        Some(lb_endpoint::HostIdentifier::Endpoint(endpoint)) => endpoint,
        Some(lb_endpoint::HostIdentifier::EndpointName(name)) => {
            return Err(format!("named endpoint {name} is not supported"));
        }
        None => return Err("endpoint has no host".to_string()),
    };

    let socket = match endpoint.address.as_ref().and_then(|a| a.address.as_ref()) {
        Some(address::Address::SocketAddress(socket)) => socket,
        Some(_) => return Err("only socket addresses are supported".to_string()),
        None => return Err("endpoint has no address".to_string()),
    };

    if socket.address.is_empty() {
        return Err("endpoint has an empty host".to_string());
    }
    let port = match &socket.port_specifier {
        Some(socket_address::PortSpecifier::PortValue(port)) => u16::try_from(*port)
            .map_err(|_| format!("port {port} out of range for {}", socket.address))?,
        Some(socket_address::PortSpecifier::NamedPort(name)) => {
            return Err(format!("named port {name} is not supported"));
        }
        None => return Err(format!("no port for {}", socket.address)),
    };

    Ok(Endpoint {
        host: socket.address.clone(),
        port,
        weight: ep.load_balancing_weight.unwrap_or(1).max(1),
        health: EndpointHealth::from(ep.health_status),
        metadata: lb_metadata(ep),
    })
}

fn lb_metadata(ep: &LbEndpoint) -> BTreeMap<String, String> {
    use prost_types::value::Kind;

    let Some(fields) = ep
        .metadata
        .as_ref()
        .and_then(|m| m.filter_metadata.get(LB_METADATA_NAMESPACE))
        .map(|s| &s.fields)
    else {
        return BTreeMap::new();
    };

    fields
        .iter()
        .filter_map(|(key, value)| {
            let rendered = match value.kind.as_ref()? {
                Kind::StringValue(s) => s.clone(),
                Kind::BoolValue(b) => b.to_string(),
                Kind::NumberValue(n) => n.to_string(),
                _ => return None,
            };
            Some((key.clone(), rendered))
        })
        .collect()
}
