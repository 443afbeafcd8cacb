//! Error types for xDS client operations.
//!
//! This module provides [`XdsError`], the error type shared by bootstrap
//! construction and resource decoding. It converts to gRPC status codes so
//! a transport can report a rejected resource back to the control plane.

/// Comprehensive error type for xDS client operations.
///
/// Bootstrap errors ([`MissingIdentityInput`](XdsError::MissingIdentityInput),
/// [`InvalidServerConfig`](XdsError::InvalidServerConfig)) are fatal for
/// startup. Decoding errors are local to one resource and are collected by
/// the batch decoder rather than aborting a whole response.
///
/// # Example
///
/// ```rust
/// use xds_core::XdsError;
///
/// fn require_address(address: &str) -> Result<(), XdsError> {
///     if address.is_empty() {
///         return Err(XdsError::InvalidServerConfig {
///             reason: "xDS server address should be specified".to_string(),
///         });
///     }
///     Ok(())
/// }
///
/// assert!(require_address("").is_err());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum XdsError {
    /// A required piece of process context was not provided.
    #[error("bootstrap: {field} is not set")]
    MissingIdentityInput {
        /// Name of the missing input.
        field: &'static str,
    },

    /// The discovery server configuration cannot be used.
    #[error("invalid xDS server config: {reason}")]
    InvalidServerConfig {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// A payload carried a type URL other than the one being decoded.
    #[error("invalid resource type: expected {expected}, got {actual}")]
    UnexpectedResourceType {
        /// The type URL the decoder handles.
        expected: String,
        /// The type URL found on the payload.
        actual: String,
    },

    /// Payload bytes could not be decoded into the wire message.
    #[error("unmarshal {type_url} failed: {source}")]
    MalformedPayload {
        /// The type URL being decoded.
        type_url: String,
        /// Underlying protobuf error.
        #[source]
        source: prost::DecodeError,
    },

    /// Endpoint data embedded in a cluster failed to decode.
    #[error("invalid inline endpoints for cluster {name}: {source}")]
    InlineEndpointDecode {
        /// Name of the cluster carrying the endpoints.
        name: String,
        /// Failure reported by the endpoint decoder.
        #[source]
        source: Box<XdsError>,
    },

    /// Resource content failed validation.
    #[error("invalid resource {type_url}/{name}: {reason}")]
    InvalidResource {
        /// The type URL of the resource.
        type_url: String,
        /// The name of the resource.
        name: String,
        /// Reason for validation failure.
        reason: String,
    },
}

impl XdsError {
    /// Wrap an endpoint decoding failure with the owning cluster's name.
    pub fn inline_endpoints(name: impl Into<String>, source: XdsError) -> Self {
        Self::InlineEndpointDecode {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error is fatal for bootstrap rather than local to one resource.
    #[must_use]
    pub fn is_bootstrap(&self) -> bool {
        matches!(
            self,
            Self::MissingIdentityInput { .. } | Self::InvalidServerConfig { .. }
        )
    }
}

/// Convert to tonic::Status so a rejected resource can be reported upstream.
impl From<XdsError> for tonic::Status {
    fn from(err: XdsError) -> Self {
        match &err {
            XdsError::MissingIdentityInput { .. } | XdsError::InvalidServerConfig { .. } => {
                tonic::Status::failed_precondition(err.to_string())
            }
            XdsError::UnexpectedResourceType { .. }
            | XdsError::MalformedPayload { .. }
            | XdsError::InlineEndpointDecode { .. }
            | XdsError::InvalidResource { .. } => tonic::Status::invalid_argument(err.to_string()),
        }
    }
}
