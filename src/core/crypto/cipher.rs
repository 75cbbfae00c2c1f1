//! AES-256-CBC encryption of secret strings under a biometric-derived key.
//!
//! Each call to [`encrypt`] draws a fresh random 16-byte IV; the IV travels
//! and is stored alongside its ciphertext. Decryption failure is a single
//! opaque error so that wrong-key and corrupted-data cases cannot be told
//! apart by a caller.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::utils::error::{Result, WalletError};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

pub const IV_LEN: usize = 16;
pub const KEY_LEN: usize = 32;

/// 256-bit symmetric key. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_LEN]);

impl SymmetricKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Transport form: lowercase hex digest, as produced by the descriptor
    /// hashing scheme.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

// Debug must not leak key material.
impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// Ciphertext plus its IV, both Base64. The unit of at-rest secret storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBlob {
    pub ciphertext: String,
    pub iv: String,
}

/// Encrypt a secret string under `key` with a fresh random IV.
pub fn encrypt(plaintext: &str, key: &SymmetricKey) -> Result<EncryptedBlob> {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), (&iv).into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    Ok(EncryptedBlob {
        ciphertext: BASE64.encode(ciphertext),
        iv: BASE64.encode(iv),
    })
}

/// Decrypt a blob. Any failure — malformed encoding, bad padding, non-UTF-8
/// output — collapses into `DecryptionFailed`.
pub fn decrypt(blob: &EncryptedBlob, key: &SymmetricKey) -> Result<String> {
    let ciphertext = BASE64
        .decode(&blob.ciphertext)
        .map_err(|_| WalletError::DecryptionFailed)?;
    let iv_bytes = BASE64
        .decode(&blob.iv)
        .map_err(|_| WalletError::DecryptionFailed)?;
    let iv: [u8; IV_LEN] = iv_bytes
        .try_into()
        .map_err(|_| WalletError::DecryptionFailed)?;

    let plaintext = Aes256CbcDec::new(key.as_bytes().into(), (&iv).into())
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| WalletError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| WalletError::DecryptionFailed)
}
