//! Server-side biometric gate: Euclidean distance between a stored reference
//! descriptor and a fresh probe, accepted under a fixed threshold.

use tracing::debug;

use crate::core::biometric::descriptor::FaceDescriptor;
use crate::utils::error::{Result, WalletError};

/// Acceptance threshold for the reference embedding model. Captures of the
/// same subject cluster well below this distance.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;

/// Euclidean distance between two equal-length descriptors.
pub fn euclidean_distance(a: &FaceDescriptor, b: &FaceDescriptor) -> Result<f64> {
    if a.len() != b.len() {
        return Err(WalletError::DescriptorLengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let sum: f64 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum();

    Ok(sum.sqrt())
}

/// Accept the probe iff its distance to the reference is within `threshold`.
/// The raw distance is logged at debug level; descriptor contents never are.
pub fn verify(
    reference: &FaceDescriptor,
    probe: &FaceDescriptor,
    threshold: f64,
) -> Result<bool> {
    let distance = euclidean_distance(reference, probe)?;
    let accepted = distance <= threshold;
    debug!(distance, threshold, accepted, "Face verification");
    Ok(accepted)
}
