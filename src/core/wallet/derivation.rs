//! Per-chain hierarchical key derivation.
//!
//! Ethereum follows BIP-32 over secp256k1 at `m/44'/60'/0'/0/<index>` (the
//! standard unhardened external-chain convention; creation and scanning both
//! go through [`derive_keypair`], so they cannot diverge). Solana follows
//! SLIP-0010 over ed25519 at the fully hardened `m/44'/501'/<index>'/0'`.
//!
//! Derivation is a pure function of (seed, chain, index): no I/O, no shared
//! state, safe to call from any thread.

use bip32::{DerivationPath, XPrv};
use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use sha2::Sha512;
use sha3::{Digest, Keccak256};

use crate::core::wallet::types::{ChainType, KeyPair};
use crate::utils::error::{Result, WalletError};

type HmacSha512 = Hmac<Sha512>;

/// Derive the keypair for `account_index` on `chain` from a 64-byte seed.
pub fn derive_keypair(seed: &[u8; 64], chain: ChainType, account_index: u32) -> Result<KeyPair> {
    match chain {
        ChainType::Ethereum => derive_ethereum(seed, account_index),
        ChainType::Solana => derive_solana(seed, account_index),
    }
}

fn derive_ethereum(seed: &[u8; 64], account_index: u32) -> Result<KeyPair> {
    let path: DerivationPath = format!(
        "m/44'/{}'/0'/0/{}",
        ChainType::Ethereum.coin_type(),
        account_index
    )
    .parse()
    .map_err(|e: bip32::Error| WalletError::Derivation(e.to_string()))?;

    let xprv = XPrv::derive_from_path(seed, &path)
        .map_err(|e| WalletError::Derivation(e.to_string()))?;

    let public_key = xprv.private_key().verifying_key().to_encoded_point(false);
    // Address is the low 20 bytes of Keccak-256 over the uncompressed point
    // without its 0x04 tag byte.
    let digest = Keccak256::digest(&public_key.as_bytes()[1..]);

    Ok(KeyPair {
        public_key: to_checksum_address(&digest[12..]),
        private_key: format!("0x{}", hex::encode(xprv.private_key().to_bytes())),
    })
}

fn derive_solana(seed: &[u8; 64], account_index: u32) -> Result<KeyPair> {
    let secret =
        slip10_ed25519_derive(seed, &[44, ChainType::Solana.coin_type(), account_index, 0])?;
    let signing_key = SigningKey::from_bytes(&secret);
    let public_key = signing_key.verifying_key().to_bytes();

    // Conventional Solana secret-key encoding: 32-byte seed followed by the
    // 32-byte public key, Base58.
    let mut secret_key = [0u8; 64];
    secret_key[..32].copy_from_slice(&secret);
    secret_key[32..].copy_from_slice(&public_key);

    Ok(KeyPair {
        public_key: bs58::encode(public_key).into_string(),
        private_key: bs58::encode(secret_key).into_string(),
    })
}

/// SLIP-0010 master-key and hardened child derivation for ed25519. Every
/// segment is hardened; ed25519 has no unhardened derivation.
fn slip10_ed25519_derive(seed: &[u8; 64], path: &[u32]) -> Result<[u8; 32]> {
    // I = HMAC-SHA512(Key="ed25519 seed", Data=seed)
    let mut mac = HmacSha512::new_from_slice(b"ed25519 seed")
        .map_err(|e| WalletError::Derivation(e.to_string()))?;
    mac.update(seed);
    let i = mac.finalize().into_bytes();

    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&i[..32]);
    chain_code.copy_from_slice(&i[32..]);

    for &index in path {
        // I = HMAC-SHA512(Key=c, Data=0x00 || k || (index | 0x80000000))
        let mut mac = HmacSha512::new_from_slice(&chain_code)
            .map_err(|e| WalletError::Derivation(e.to_string()))?;
        mac.update(&[0x00]);
        mac.update(&key);
        mac.update(&(index | 0x8000_0000).to_be_bytes());
        let i = mac.finalize().into_bytes();
        key.copy_from_slice(&i[..32]);
        chain_code.copy_from_slice(&i[32..]);
    }

    Ok(key)
}

/// EIP-55 mixed-case checksum encoding of a 20-byte address.
fn to_checksum_address(bytes: &[u8]) -> String {
    let addr_hex = hex::encode(bytes);
    let hash = Keccak256::digest(addr_hex.as_bytes());

    let mut out = String::with_capacity(2 + addr_hex.len());
    out.push_str("0x");
    for (i, c) in addr_hex.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wallet::mnemonic::{mnemonic_to_seed, parse_mnemonic};

    fn test_seed() -> [u8; 64] {
        let mnemonic = parse_mnemonic(
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
        )
        .unwrap();
        mnemonic_to_seed(&mnemonic, "")
    }

    #[test]
    fn ethereum_account_zero_matches_reference_address() {
        let keypair = derive_keypair(&test_seed(), ChainType::Ethereum, 0).unwrap();
        assert!(keypair
            .public_key
            .eq_ignore_ascii_case("0x9858effd232b4033e47d90003d41ec34ecaeda94"));
    }

    #[test]
    fn ethereum_address_carries_valid_checksum() {
        let keypair = derive_keypair(&test_seed(), ChainType::Ethereum, 0).unwrap();
        let rechecked = to_checksum_address(
            &hex::decode(keypair.public_key.trim_start_matches("0x").to_lowercase()).unwrap(),
        );
        assert_eq!(keypair.public_key, rechecked);
    }

    #[test]
    fn ethereum_private_key_is_hex_scalar() {
        let keypair = derive_keypair(&test_seed(), ChainType::Ethereum, 3).unwrap();
        let stripped = keypair.private_key.trim_start_matches("0x");
        assert_eq!(stripped.len(), 64);
        assert_eq!(hex::decode(stripped).unwrap().len(), 32);
    }

    #[test]
    fn derivation_is_deterministic() {
        let seed = test_seed();
        for chain in [ChainType::Ethereum, ChainType::Solana] {
            let a = derive_keypair(&seed, chain, 7).unwrap();
            let b = derive_keypair(&seed, chain, 7).unwrap();
            assert_eq!(a.public_key, b.public_key);
            assert_eq!(a.private_key, b.private_key);
        }
    }

    #[test]
    fn distinct_indices_yield_distinct_keys() {
        let seed = test_seed();
        for chain in [ChainType::Ethereum, ChainType::Solana] {
            let a = derive_keypair(&seed, chain, 0).unwrap();
            let b = derive_keypair(&seed, chain, 1).unwrap();
            assert_ne!(a.public_key, b.public_key);
        }
    }

    #[test]
    fn solana_keys_decode_to_expected_lengths() {
        let keypair = derive_keypair(&test_seed(), ChainType::Solana, 0).unwrap();
        let public = bs58::decode(&keypair.public_key).into_vec().unwrap();
        let secret = bs58::decode(&keypair.private_key).into_vec().unwrap();
        assert_eq!(public.len(), 32);
        assert_eq!(secret.len(), 64);
        // Secret key tail is the public key
        assert_eq!(&secret[32..], public.as_slice());
    }

    #[test]
    fn slip10_path_is_order_sensitive() {
        let seed = test_seed();
        let a = slip10_ed25519_derive(&seed, &[44, 501, 0, 0]).unwrap();
        let b = slip10_ed25519_derive(&seed, &[44, 501, 1, 0]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn checksum_encoding_matches_eip55_vector() {
        let bytes = hex::decode("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(
            to_checksum_address(&bytes),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }
}
