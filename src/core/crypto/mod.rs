//! Symmetric encryption of key material at rest.

pub mod cipher;

pub use cipher::{decrypt, encrypt, EncryptedBlob, SymmetricKey};
