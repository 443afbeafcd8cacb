//! # xds-core
//!
//! Core types, traits, and error handling for the mesh xDS client.
//!
//! This crate provides the foundational types used across the other crates:
//!
//! - [`XdsError`] - Error type with gRPC status code mapping
//! - [`TypeUrl`] - Type URL handling and constants
//! - [`ResourceDecoder`] - Trait for decoding one kind of xDS resource
//! - [`DecodeFailure`] - Per-payload failure carrying the name when known
//!
//! ## Example
//!
//! ```rust
//! use xds_core::{TypeUrl, XdsError};
//!
//! let err = XdsError::UnexpectedResourceType {
//!     expected: TypeUrl::CLUSTER.to_string(),
//!     actual: TypeUrl::LISTENER.to_string(),
//! };
//! assert!(!err.is_bootstrap());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod resource;
mod type_url;

pub use error::XdsError;
pub use resource::{DecodeFailure, ResourceDecoder};
pub use type_url::TypeUrl;

/// Result type alias using [`XdsError`].
pub type Result<T> = std::result::Result<T, XdsError>;
