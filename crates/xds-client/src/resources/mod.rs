//! Decoding of xDS resources delivered by the control plane.
//!
//! Only clusters are decoded as a resource kind; endpoint sets are decoded
//! when a cluster embeds them.

pub mod batch;
pub mod cluster;
pub mod endpoint;

pub use batch::{decode_batch, BatchDecodeError, DecodeBatch, ItemOutcome};
pub use cluster::{
    decode_cluster, ClusterDecoder, ClusterDiscoveryType, ClusterLbPolicy, ClusterResource,
};
pub use endpoint::{decode_load_assignment, Endpoint, EndpointHealth, EndpointSet, Locality};

/// Decode a CDS response's resources.
///
/// # Example
///
/// ```rust
/// use xds_client::resources::unmarshal_clusters;
///
/// let bogus = prost_types::Any { type_url: "bogus".to_string(), value: vec![] };
/// let batch = unmarshal_clusters(&[bogus]);
/// assert!(batch.resources().is_empty());
/// assert_eq!(batch.error().map(|e| e.anonymous().count()), Some(1));
/// ```
pub fn unmarshal_clusters(raw: &[prost_types::Any]) -> DecodeBatch<ClusterResource> {
    decode_batch(&ClusterDecoder, raw)
}
