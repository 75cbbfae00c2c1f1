//! Face descriptors and the symmetric key derived from them.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::time::Instant;

use crate::core::crypto::SymmetricKey;
use crate::utils::error::{Result, WalletError};

/// Descriptor length produced by the reference embedding model.
pub const REFERENCE_DESCRIPTOR_LEN: usize = 128;

/// Delimiter used when rendering a descriptor for hashing.
const JOIN_DELIMITER: &str = ",";

/// Fixed-length facial feature embedding, produced by an external detector.
/// Consumed as an opaque numeric vector; the core never inspects individual
/// features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceDescriptor(Vec<f64>);

impl FaceDescriptor {
    pub fn new(elements: Vec<f64>) -> Self {
        Self(elements)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Reduce a descriptor to a 256-bit symmetric key: SHA-256 over the UTF-8
/// comma-joined decimal rendering of its elements.
///
/// Deterministic and one-way, but *not* noise-tolerant: two captures of the
/// same face differ at the bit level, so decrypting previously encrypted data
/// requires the exact raw descriptor that keyed the encryption. The
/// threshold-based gate in [`super::verifier`] is a separate concern and does
/// not relax this.
pub fn derive_key(descriptor: &FaceDescriptor) -> SymmetricKey {
    let joined = descriptor
        .as_slice()
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(JOIN_DELIMITER);

    let digest = Sha256::digest(joined.as_bytes());
    SymmetricKey::from_bytes(digest.into())
}

/// External descriptor producer, typically a camera-backed detector that may
/// report "no face in frame" rather than failing.
#[async_trait]
pub trait DescriptorSource: Send + Sync {
    async fn capture(&self) -> Result<Option<FaceDescriptor>>;
}

const CAPTURE_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Poll `source` until it yields a descriptor or `deadline` elapses. An
/// exhausted deadline surfaces as `NoFaceDetected`, which callers treat as
/// recoverable (re-prompt for another capture).
pub async fn acquire_descriptor(
    source: &dyn DescriptorSource,
    deadline: Duration,
) -> Result<FaceDescriptor> {
    let started = Instant::now();
    loop {
        if let Some(descriptor) = source.capture().await? {
            return Ok(descriptor);
        }
        if started.elapsed() >= deadline {
            return Err(WalletError::NoFaceDetected);
        }
        tokio::time::sleep(CAPTURE_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(fill: f64) -> FaceDescriptor {
        FaceDescriptor::new(vec![fill; REFERENCE_DESCRIPTOR_LEN])
    }

    #[test]
    fn key_derivation_is_deterministic() {
        let d = FaceDescriptor::new(vec![0.125, -0.5, 0.333333, 42.0]);
        assert_eq!(derive_key(&d).to_hex(), derive_key(&d).to_hex());
    }

    #[test]
    fn distinct_descriptors_yield_distinct_keys() {
        let a = descriptor(0.1);
        let b = descriptor(0.1000001);
        assert_ne!(derive_key(&a).to_hex(), derive_key(&b).to_hex());
    }

    #[test]
    fn key_hex_is_sha256_sized() {
        assert_eq!(derive_key(&descriptor(0.0)).to_hex().len(), 64);
    }

    #[test]
    fn key_matches_direct_hash_of_joined_decimals() {
        let d = FaceDescriptor::new(vec![0.5, -1.0]);
        let expected = Sha256::digest("0.5,-1".as_bytes());
        assert_eq!(derive_key(&d).as_bytes().as_slice(), expected.as_slice());
    }

    struct FlakySource {
        misses: std::sync::Mutex<u32>,
    }

    #[async_trait]
    impl DescriptorSource for FlakySource {
        async fn capture(&self) -> Result<Option<FaceDescriptor>> {
            let mut misses = self.misses.lock().unwrap();
            if *misses > 0 {
                *misses -= 1;
                Ok(None)
            } else {
                Ok(Some(FaceDescriptor::new(vec![0.0; REFERENCE_DESCRIPTOR_LEN])))
            }
        }
    }

    #[tokio::test]
    async fn acquisition_retries_past_empty_captures() {
        let source = FlakySource {
            misses: std::sync::Mutex::new(2),
        };
        let descriptor = acquire_descriptor(&source, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(descriptor.len(), REFERENCE_DESCRIPTOR_LEN);
    }

    struct EmptySource;

    #[async_trait]
    impl DescriptorSource for EmptySource {
        async fn capture(&self) -> Result<Option<FaceDescriptor>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn acquisition_deadline_surfaces_no_face() {
        let err = acquire_descriptor(&EmptySource, Duration::from_millis(0))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::NoFaceDetected));
    }
}
