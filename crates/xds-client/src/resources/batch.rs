//! Batch decoding with per-item failure isolation.
//!
//! A discovery response carries many resources. One bad resource must not
//! hide the others: every payload is decoded on its own, successes are
//! kept, and failures are reported together in one [`BatchDecodeError`].

use std::collections::BTreeMap;

use tracing::{debug, warn};
use xds_core::{DecodeFailure, ResourceDecoder, TypeUrl, XdsError};

/// Result of decoding one payload.
#[derive(Debug)]
pub enum ItemOutcome<T> {
    /// The payload decoded.
    Decoded {
        /// Resource name.
        name: String,
        /// Decoded value.
        resource: T,
    },
    /// The payload was rejected.
    Failed(DecodeFailure),
}

impl<T> From<Result<(String, T), DecodeFailure>> for ItemOutcome<T> {
    fn from(result: Result<(String, T), DecodeFailure>) -> Self {
        match result {
            Ok((name, resource)) => Self::Decoded { name, resource },
            Err(failure) => Self::Failed(failure),
        }
    }
}

/// Every failure of a batch, in input order.
///
/// Failures with a recovered name identify a broken resource; the others
/// could not be attributed to any name.
#[derive(Debug, thiserror::Error)]
#[error("{}", render(.failures, .total))]
pub struct BatchDecodeError {
    failures: Vec<DecodeFailure>,
    total: usize,
}

fn render(failures: &[DecodeFailure], total: impl std::fmt::Display) -> String {
    let items = failures
        .iter()
        .map(|f| match &f.name {
            Some(name) => format!("[{name}] {}", f.error),
            None => format!("[unnamed] {}", f.error),
        })
        .collect::<Vec<_>>()
        .join("; ");
    format!("{} of {total} resources failed to decode: {items}", failures.len())
}

impl BatchDecodeError {
    /// All failures in input order.
    #[must_use]
    pub fn failures(&self) -> &[DecodeFailure] {
        &self.failures
    }

    /// Take ownership of the failures, e.g. to report them upstream.
    #[must_use]
    pub fn into_failures(self) -> Vec<DecodeFailure> {
        self.failures
    }

    /// Failures attributed to a resource name.
    pub fn named(&self) -> impl Iterator<Item = (&str, &XdsError)> {
        self.failures
            .iter()
            .filter_map(|f| f.name.as_deref().map(|name| (name, &f.error)))
    }

    /// Failures with no recoverable name.
    pub fn anonymous(&self) -> impl Iterator<Item = &XdsError> {
        self.failures
            .iter()
            .filter(|f| f.name.is_none())
            .map(|f| &f.error)
    }

    /// Number of failed payloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether there are no failures. A batch only reports an error when this is false.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Size of the batch the failures came from.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.total
    }
}

/// Decoded resources of a batch plus the failures, if any.
#[derive(Debug)]
pub struct DecodeBatch<T> {
    resources: BTreeMap<String, T>,
    error: Option<BatchDecodeError>,
}

impl<T> DecodeBatch<T> {
    /// Partition per-item outcomes into resources and one error.
    ///
    /// A later resource with the same name replaces an earlier one.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = ItemOutcome<T>>) -> Self {
        let mut resources = BTreeMap::new();
        let mut failures = Vec::new();
        let mut total = 0;

        for outcome in outcomes {
            total += 1;
            match outcome {
                ItemOutcome::Decoded { name, resource } => {
                    resources.insert(name, resource);
                }
                ItemOutcome::Failed(failure) => failures.push(failure),
            }
        }

        let error = (!failures.is_empty()).then_some(BatchDecodeError { failures, total });
        Self { resources, error }
    }

    /// Decoded resources keyed by name.
    #[inline]
    pub fn resources(&self) -> &BTreeMap<String, T> {
        &self.resources
    }

    /// The aggregated error, if any payload failed.
    #[inline]
    pub fn error(&self) -> Option<&BatchDecodeError> {
        self.error.as_ref()
    }

    /// Whether every payload decoded.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Split into the resource map and the outcome of the batch.
    pub fn into_parts(self) -> (BTreeMap<String, T>, Result<(), BatchDecodeError>) {
        let result = match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        };
        (self.resources, result)
    }
}

/// Decode every payload with `decoder`.
///
/// Never fails as a whole: successes are always returned, and failures are
/// logged and collected into [`DecodeBatch::error`].
pub fn decode_batch<D: ResourceDecoder>(
    decoder: &D,
    raw: &[prost_types::Any],
) -> DecodeBatch<D::Output> {
    let type_url = TypeUrl::new(decoder.type_url());

    let outcomes = raw.iter().enumerate().map(|(index, any)| {
        let outcome = ItemOutcome::from(decoder.decode(any));
        if let ItemOutcome::Failed(failure) = &outcome {
            warn!(
                resource_type = type_url.short_name(),
                index,
                name = failure.name.as_deref().unwrap_or_default(),
                error = %failure.error,
                "failed to decode resource"
            );
        }
        outcome
    });
    let batch = DecodeBatch::from_outcomes(outcomes);

    debug!(
        resource_type = type_url.short_name(),
        received = raw.len(),
        decoded = batch.resources.len(),
        failed = batch.error.as_ref().map_or(0, BatchDecodeError::len),
        "decoded resource batch"
    );
    batch
}
