//! Mnemonic handling, per-chain key derivation, and account scanning.

pub mod derivation;
pub mod mnemonic;
pub mod scanner;
pub mod types;

pub use derivation::derive_keypair;
pub use mnemonic::{generate_mnemonic, mnemonic_to_seed, parse_mnemonic};
pub use scanner::{AccountScanner, DEFAULT_SCAN_WINDOW};
pub use types::{AccountInfo, ChainType, KeyPair, Network, WalletRecord};
