//! # xds-client
//!
//! Bootstrap and resource decoding for an xDS client in an Istio-style mesh.
//!
//! This crate covers the parts of the client that are pure transformations:
//!
//! - [`identity`] - Derive the node id and metadata from process context
//! - [`config`] - Discovery server parameters and their validation
//! - [`BootstrapConfig`] - Node identity plus validated server config
//! - [`resources`] - Decode CDS payloads, isolating per-resource failures
//!
//! The streaming transport, ACK/NACK handling and caching live elsewhere;
//! they call into this crate once at startup and once per received batch.
//!
//! ## Example
//!
//! ```rust
//! use xds_client::{BootstrapConfig, IdentityInputs, XdsServerConfig};
//! use xds_client::resources::unmarshal_clusters;
//!
//! let bootstrap = BootstrapConfig::new(
//!     &IdentityInputs::new("default", "productpage-v1-6b7f", "10.244.0.12")
//!         .control_plane_version("1.20.2"),
//!     XdsServerConfig::default(),
//! )?;
//! assert!(bootstrap.node().id().starts_with("sidecar~10.244.0.12~"));
//!
//! // Resources of a DiscoveryResponse
//! let batch = unmarshal_clusters(&[]);
//! assert!(batch.is_ok());
//! # Ok::<(), xds_core::XdsError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod bootstrap;
pub mod config;
pub mod identity;
pub mod resources;

pub use bootstrap::BootstrapConfig;
pub use config::{ClientOptions, XdsServerConfig};
pub use identity::{resolve_identity, IdentityInputs, NodeIdentity};
pub use resources::{
    decode_batch, unmarshal_clusters, BatchDecodeError, ClusterDecoder, ClusterDiscoveryType,
    ClusterLbPolicy, ClusterResource, DecodeBatch, EndpointSet,
};
