//! Bootstrap configuration handed to the xDS transport at startup.

use tracing::info;
use xds_core::Result;
use xds_types::envoy::config::core::v3::Node;

use crate::config::XdsServerConfig;
use crate::identity::{resolve_identity, IdentityInputs, NodeIdentity};

/// Node identity plus validated server config. Immutable once built.
///
/// # Example
///
/// ```rust
/// use xds_client::{BootstrapConfig, IdentityInputs, XdsServerConfig};
///
/// let bootstrap = BootstrapConfig::new(
///     &IdentityInputs::new("default", "reviews-v1-5d8f", "10.1.2.3"),
///     XdsServerConfig::new("istiod.istio-system.svc:15010"),
/// )
/// .unwrap();
///
/// assert_eq!(
///     bootstrap.node().id(),
///     "sidecar~10.1.2.3~reviews-v1-5d8f.default~default.svc.cluster.local"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig {
    node: NodeIdentity,
    server: XdsServerConfig,
}

impl BootstrapConfig {
    /// Resolve the node identity and validate the server config.
    ///
    /// Identity errors are reported before server config errors.
    pub fn new(inputs: &IdentityInputs, mut server: XdsServerConfig) -> Result<Self> {
        let node = resolve_identity(inputs)?;
        server.validate()?;

        info!(
            node_id = %node.id(),
            server = %server.address,
            "xDS bootstrap config constructed"
        );

        Ok(Self { node, server })
    }

    /// Build from the process environment.
    pub fn from_env(server: XdsServerConfig) -> Result<Self> {
        Self::new(&IdentityInputs::from_env(), server)
    }

    /// The node identity.
    #[inline]
    pub fn node(&self) -> &NodeIdentity {
        &self.node
    }

    /// The validated server config.
    #[inline]
    pub fn server(&self) -> &XdsServerConfig {
        &self.server
    }

    /// The node as sent in discovery requests.
    pub fn node_proto(&self) -> Node {
        self.node.to_proto()
    }
}
