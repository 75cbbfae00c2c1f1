//! Biometric key derivation and verification.
//!
//! Two deliberately separate concerns: [`descriptor::derive_key`] turns raw
//! descriptor bytes into a symmetric key (bit-exact, no tolerance), while
//! [`verifier::verify`] is a distance-based gate used server-side to decide
//! whether a probe belongs to the account owner.

pub mod descriptor;
pub mod verifier;

pub use descriptor::{acquire_descriptor, derive_key, DescriptorSource, FaceDescriptor};
pub use verifier::{euclidean_distance, verify, DEFAULT_MATCH_THRESHOLD};
