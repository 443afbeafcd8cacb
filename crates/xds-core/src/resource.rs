//! Decoding seam for xDS resources.
//!
//! A [`ResourceDecoder`] turns one opaque `google.protobuf.Any` payload into
//! a named, typed value. The batch decoder in `xds-client` is generic over
//! this trait so each resource kind only has to describe a single item.

use std::fmt;

use crate::{TypeUrl, XdsError};

/// Failure to decode one payload.
///
/// `name` is set when the resource name was read before the failure, so a
/// caller can tell which resource is broken.
#[derive(Debug)]
pub struct DecodeFailure {
    /// Resource name, if it was recovered.
    pub name: Option<String>,
    /// Why the payload was rejected.
    pub error: XdsError,
}

impl DecodeFailure {
    /// A failure that happened before any name was known.
    #[must_use]
    pub fn anonymous(error: XdsError) -> Self {
        Self { name: None, error }
    }

    /// A failure attributed to a named resource.
    #[must_use]
    pub fn named(name: impl Into<String>, error: XdsError) -> Self {
        let name = name.into();
        // An empty name is no better than none.
        let name = (!name.is_empty()).then_some(name);
        Self { name, error }
    }
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Decodes one kind of xDS resource.
///
/// Implementations must be pure: decoding the same payload twice yields
/// equal values.
///
/// # Example
///
/// ```rust
/// use xds_core::{DecodeFailure, ResourceDecoder, TypeUrl, XdsError};
///
/// struct NameOnly;
///
/// impl ResourceDecoder for NameOnly {
///     type Output = ();
///
///     fn type_url(&self) -> &'static str {
///         TypeUrl::CLUSTER
///     }
///
///     fn decode(&self, any: &prost_types::Any) -> Result<(String, ()), DecodeFailure> {
///         self.check_type(any)?;
///         String::from_utf8(any.value.clone())
///             .map(|name| (name, ()))
///             .map_err(|e| DecodeFailure::anonymous(XdsError::InvalidResource {
///                 type_url: TypeUrl::CLUSTER.to_string(),
///                 name: String::new(),
///                 reason: e.to_string(),
///             }))
///     }
/// }
///
/// let any = prost_types::Any { type_url: TypeUrl::CLUSTER.to_string(), value: b"c1".to_vec() };
/// assert_eq!(NameOnly.decode(&any).unwrap().0, "c1");
/// ```
pub trait ResourceDecoder {
    /// Typed value produced for each payload.
    type Output;

    /// The type URL this decoder accepts.
    fn type_url(&self) -> &'static str;

    /// Decode one payload into `(resource name, value)`.
    fn decode(&self, any: &prost_types::Any) -> Result<(String, Self::Output), DecodeFailure>;

    /// Reject payloads whose type URL is not [`type_url`](Self::type_url).
    fn check_type(&self, any: &prost_types::Any) -> Result<(), DecodeFailure> {
        if TypeUrl::new(self.type_url()).matches(&any.type_url) {
            Ok(())
        } else {
            Err(DecodeFailure::anonymous(XdsError::UnexpectedResourceType {
                expected: self.type_url().to_string(),
                actual: any.type_url.clone(),
            }))
        }
    }
}
