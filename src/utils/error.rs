// src/utils/error.rs
use thiserror::Error;

/// Error taxonomy for the wallet core and its service layer.
///
/// Secret material (mnemonics, private keys, raw face descriptors) must never
/// be interpolated into any of these variants.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Unsupported chain type: {0}")]
    UnsupportedChainType(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Balance query failed: {0}")]
    BalanceQueryFailed(String),

    #[error("Descriptor length mismatch: expected {expected}, got {actual}")]
    DescriptorLengthMismatch { expected: usize, actual: usize },

    // Wrong key and corrupted ciphertext are deliberately indistinguishable.
    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("No face detected")]
    NoFaceDetected,

    #[error("Key derivation error: {0}")]
    Derivation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization error: {0}")]
    Init(String),
}

pub type Result<T> = std::result::Result<T, WalletError>;
