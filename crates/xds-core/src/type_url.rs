//! Type URL handling for xDS resources.
//!
//! Every payload in a discovery response is a `google.protobuf.Any` whose
//! type URL names the message schema of its bytes. Decoders compare the
//! payload's URL against the constants defined here before decoding.

use std::fmt;

/// Type URL of an xDS resource kind.
///
/// # Example
///
/// ```rust
/// use xds_core::TypeUrl;
///
/// let cluster = TypeUrl::new(TypeUrl::CLUSTER);
/// assert_eq!(cluster.short_name(), "Cluster");
/// assert!(cluster.matches(TypeUrl::CLUSTER));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeUrl(String);

impl TypeUrl {
    /// Type URL for Cluster (CDS).
    pub const CLUSTER: &'static str = "type.googleapis.com/envoy.config.cluster.v3.Cluster";

    /// Type URL for ClusterLoadAssignment (EDS).
    pub const ENDPOINT: &'static str =
        "type.googleapis.com/envoy.config.endpoint.v3.ClusterLoadAssignment";

    /// Type URL for Listener (LDS).
    pub const LISTENER: &'static str = "type.googleapis.com/envoy.config.listener.v3.Listener";

    /// Type URL for RouteConfiguration (RDS).
    pub const ROUTE: &'static str =
        "type.googleapis.com/envoy.config.route.v3.RouteConfiguration";

    /// Create a new type URL from a string.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Get the type URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the message name from the type URL.
    ///
    /// `type.googleapis.com/envoy.config.cluster.v3.Cluster` yields `Cluster`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().and_then(|s| s.rsplit('.').next()).unwrap_or(&self.0)
    }

    /// Whether a payload's type URL names this resource kind.
    #[must_use]
    pub fn matches(&self, payload_type_url: &str) -> bool {
        self.0 == payload_type_url
    }
}

impl fmt::Display for TypeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeUrl {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TypeUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
