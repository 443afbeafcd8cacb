//! Node identity resolution.
//!
//! The control plane identifies a client by a node id and metadata. Istio
//! expects sidecar-style ids of the form
//! `sidecar~{ip}~{pod}.{namespace}~{namespace}.svc.{domain}`, which
//! [`resolve_identity`] derives from an explicit [`IdentityInputs`] value.
//! Reading the process environment happens only in
//! [`IdentityInputs::from_env`], at the caller's edge.

use std::env;

use serde_json::{Map, Value};
use tracing::warn;
use xds_core::{Result, XdsError};
use xds_types::envoy::config::core::v3::node::UserAgentVersionType;
use xds_types::envoy::config::core::v3::Node;

/// Environment variable holding the pod namespace.
pub const ENV_POD_NAMESPACE: &str = "POD_NAMESPACE";
/// Environment variable holding the pod name.
pub const ENV_POD_NAME: &str = "POD_NAME";
/// Environment variable holding the instance IP.
pub const ENV_INSTANCE_IP: &str = "INSTANCE_IP";
/// Environment variable overriding the cluster domain.
///
/// Deployments migrating from Kitex set this instead of `KITEX_XDS_DOMAIN`.
pub const ENV_NODE_DOMAIN: &str = "XDS_NODE_DOMAIN";
/// Environment variable holding node metadata as a JSON object.
///
/// Deployments migrating from Kitex set this instead of `KITEX_XDS_METAS`.
pub const ENV_NODE_METADATA: &str = "XDS_NODE_METADATA";
/// Environment variable holding the control plane version.
pub const ENV_ISTIO_VERSION: &str = "ISTIO_VERSION";

/// Metadata key carrying the control plane version.
///
/// Pinning the version lets a canary istiod pick up only its own clients.
pub const VERSION_METADATA_KEY: &str = "ISTIO_VERSION";

/// `user_agent_name` sent in the node.
pub const USER_AGENT_NAME: &str = "mesh-xds";

/// `user_agent_version` sent in the node.
pub const USER_AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cluster domain used when no override is given.
pub const DEFAULT_DOMAIN: &str = "cluster.local";

/// Process context needed to build a node identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityInputs {
    /// Kubernetes namespace of the pod.
    pub namespace: String,
    /// Name of the pod.
    pub pod_name: String,
    /// IP address of this instance.
    pub instance_ip: String,
    /// Cluster domain, [`DEFAULT_DOMAIN`] when unset.
    pub domain: Option<String>,
    /// Node metadata as a JSON object.
    pub raw_metadata: Option<String>,
    /// Control plane version to advertise.
    pub control_plane_version: Option<String>,
}

impl IdentityInputs {
    /// Create inputs from the three required values.
    pub fn new(
        namespace: impl Into<String>,
        pod_name: impl Into<String>,
        instance_ip: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            pod_name: pod_name.into(),
            instance_ip: instance_ip.into(),
            ..Default::default()
        }
    }

    /// Read inputs from the process environment.
    ///
    /// Missing variables become empty strings so that
    /// [`resolve_identity`] reports them.
    pub fn from_env() -> Self {
        let optional = |key: &str| env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            namespace: env::var(ENV_POD_NAMESPACE).unwrap_or_default(),
            pod_name: env::var(ENV_POD_NAME).unwrap_or_default(),
            instance_ip: env::var(ENV_INSTANCE_IP).unwrap_or_default(),
            domain: optional(ENV_NODE_DOMAIN),
            raw_metadata: optional(ENV_NODE_METADATA),
            control_plane_version: optional(ENV_ISTIO_VERSION),
        }
    }

    /// Override the cluster domain.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the raw metadata document.
    pub fn metadata(mut self, raw: impl Into<String>) -> Self {
        self.raw_metadata = Some(raw.into());
        self
    }

    /// Set the control plane version.
    pub fn control_plane_version(mut self, version: impl Into<String>) -> Self {
        self.control_plane_version = Some(version.into());
        self
    }
}

/// Identity a client presents to the control plane.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeIdentity {
    id: String,
    metadata: Map<String, Value>,
}

impl NodeIdentity {
    /// Node id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Node metadata, ordered by key.
    #[must_use]
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Build the `envoy.config.core.v3.Node` sent on the discovery stream.
    #[must_use]
    pub fn to_proto(&self) -> Node {
        Node {
            id: self.id.clone(),
            metadata: Some(map_to_struct(&self.metadata)),
            user_agent_name: USER_AGENT_NAME.to_string(),
            user_agent_version_type: Some(UserAgentVersionType::UserAgentVersion(
                USER_AGENT_VERSION.to_string(),
            )),
            ..Default::default()
        }
    }
}

/// Derive the node identity from explicit inputs.
///
/// Fails with [`XdsError::MissingIdentityInput`] if the namespace, pod name
/// or instance IP is empty. Bad metadata is logged and replaced by the
/// version-only default.
///
/// # Example
///
/// ```rust
/// use xds_client::identity::{resolve_identity, IdentityInputs};
///
/// let node = resolve_identity(&IdentityInputs::new("ns", "p", "10.0.0.1")).unwrap();
/// assert_eq!(node.id(), "sidecar~10.0.0.1~p.ns~ns.svc.cluster.local");
/// ```
pub fn resolve_identity(inputs: &IdentityInputs) -> Result<NodeIdentity> {
    let required = [
        ("namespace", &inputs.namespace),
        ("pod_name", &inputs.pod_name),
        ("instance_ip", &inputs.instance_ip),
    ];
    if let Some((field, _)) = required.into_iter().find(|(_, value)| value.is_empty()) {
        return Err(XdsError::MissingIdentityInput { field });
    }

    let domain = inputs
        .domain
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_DOMAIN);
    let version = inputs.control_plane_version.as_deref().unwrap_or_default();

    Ok(NodeIdentity {
        id: node_id(&inputs.instance_ip, &inputs.pod_name, &inputs.namespace, domain),
        metadata: parse_metadata(inputs.raw_metadata.as_deref().unwrap_or_default(), version),
    })
}

fn node_id(ip: &str, pod_name: &str, namespace: &str, domain: &str) -> String {
    format!("sidecar~{ip}~{pod_name}.{namespace}~{namespace}.svc.{domain}")
}

/// Parse node metadata, falling back to `{ISTIO_VERSION: version}`.
///
/// A parsed document that does not set the version key gets it added when
/// `version` is non-empty.
pub fn parse_metadata(raw: &str, version: &str) -> Map<String, Value> {
    let default = || {
        let mut meta = Map::new();
        meta.insert(VERSION_METADATA_KEY.to_string(), Value::from(version));
        meta
    };

    if raw.is_empty() {
        return default();
    }

    match serde_json::from_str::<Map<String, Value>>(raw) {
        Ok(mut meta) => {
            if !version.is_empty() && !meta.contains_key(VERSION_METADATA_KEY) {
                meta.insert(VERSION_METADATA_KEY.to_string(), Value::from(version));
            }
            meta
        }
        Err(e) => {
            warn!(metadata = raw, error = %e, "xDS node metadata is invalid, using default");
            default()
        }
    }
}

fn map_to_struct(map: &Map<String, Value>) -> prost_types::Struct {
    prost_types::Struct {
        fields: map
            .iter()
            .map(|(k, v)| (k.clone(), json_to_proto(v)))
            .collect(),
    }
}

fn json_to_proto(value: &Value) -> prost_types::Value {
    use prost_types::value::Kind;

    let kind = match value {
        Value::Null => Kind::NullValue(prost_types::NullValue::NullValue as i32),
        Value::Bool(b) => Kind::BoolValue(*b),
        Value::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or_default()),
        Value::String(s) => Kind::StringValue(s.clone()),
        Value::Array(items) => Kind::ListValue(prost_types::ListValue {
            values: items.iter().map(json_to_proto).collect(),
        }),
        Value::Object(map) => Kind::StructValue(map_to_struct(map)),
    };
    prost_types::Value { kind: Some(kind) }
}
