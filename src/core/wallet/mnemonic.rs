//! BIP-39 mnemonic generation and seed expansion.

use bip39::Mnemonic;

use crate::utils::error::{Result, WalletError};

/// Word count for generated mnemonics (128 bits of entropy).
pub const GENERATED_WORD_COUNT: usize = 12;

/// Generate a fresh mnemonic from the OS entropy source. Entropy exhaustion
/// is fatal and surfaces as an error, never retried here.
pub fn generate_mnemonic() -> Result<Mnemonic> {
    Mnemonic::generate(GENERATED_WORD_COUNT)
        .map_err(|e| WalletError::Derivation(format!("Mnemonic generation failed: {}", e)))
}

/// Parse a user-supplied phrase, validating the checksum. The phrase itself
/// is never echoed into the error.
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic> {
    Mnemonic::parse(phrase).map_err(|e| WalletError::InvalidMnemonic(e.to_string()))
}

/// Deterministic BIP-39 seed expansion: PBKDF2-HMAC-SHA512, 2048 rounds.
/// The passphrase is empty everywhere in this system unless a caller
/// explicitly supplies one.
pub fn mnemonic_to_seed(mnemonic: &Mnemonic, passphrase: &str) -> [u8; 64] {
    mnemonic.to_seed(passphrase)
}
