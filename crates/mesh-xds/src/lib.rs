//! # mesh-xds
//!
//! xDS client building blocks for service mesh data planes.
//!
//! This crate covers what a mesh client has to do before and after talking
//! to the control plane:
//!
//! - Derive the node identity (id and metadata) from the pod's environment
//! - Validate the discovery server configuration
//! - Decode Cluster Discovery Service payloads, isolating bad resources
//!
//! ## Quick Start
//!
//! ```rust
//! use mesh_xds::prelude::*;
//!
//! // Identity comes from the pod environment in production
//! let inputs = IdentityInputs::new("default", "reviews-v1-5d8f", "10.244.1.7")
//!     .control_plane_version("1.20.2");
//!
//! let bootstrap = BootstrapConfig::new(&inputs, XdsServerConfig::default())?;
//! assert_eq!(
//!     bootstrap.node().id(),
//!     "sidecar~10.244.1.7~reviews-v1-5d8f.default~default.svc.cluster.local"
//! );
//!
//! // Each DiscoveryResponse is decoded as one batch
//! let (clusters, result) = unmarshal_clusters(&[]).into_parts();
//! assert!(clusters.is_empty() && result.is_ok());
//! # Ok::<(), XdsError>(())
//! ```
//!
//! ## Architecture
//!
//! This library is organized into several crates:
//!
//! - `xds-core` - Error type, type URLs and the decoder trait
//! - `xds-types` - Envoy v3 protobuf messages
//! - `xds-client` - Bootstrap construction and resource decoding
//!
//! This crate (`mesh-xds`) re-exports all public APIs for convenience.
//!
//! ## Design Principles
//!
//! 1. **No panics in library code** - All errors are returned as `Result`
//! 2. **Partial success** - One malformed resource never hides the others
//! 3. **Pure derivation** - The environment is read once, at the edge

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Re-export all sub-crates
pub use xds_client as client;
pub use xds_core as core;
pub use xds_types as types;

/// Prelude module for convenient imports.
///
/// ```rust
/// use mesh_xds::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use xds_core::{DecodeFailure, ResourceDecoder, Result, TypeUrl, XdsError};

    // Bootstrap
    pub use xds_client::{
        resolve_identity, BootstrapConfig, ClientOptions, IdentityInputs, NodeIdentity,
        XdsServerConfig,
    };

    // Resource decoding
    pub use xds_client::resources::{
        decode_batch, unmarshal_clusters, BatchDecodeError, ClusterDecoder, ClusterDiscoveryType,
        ClusterLbPolicy, ClusterResource, DecodeBatch, EndpointSet,
    };
}
