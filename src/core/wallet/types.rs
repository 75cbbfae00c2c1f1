use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::error::WalletError;

/// Closed set of supported chains. Adding a chain is a compile-time-checked
/// extension; unknown identifiers are rejected at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
    Ethereum,
    Solana,
}

impl ChainType {
    /// BIP-44 coin type for the chain.
    pub fn coin_type(&self) -> u32 {
        match self {
            ChainType::Ethereum => 60,
            ChainType::Solana => 501,
        }
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainType::Ethereum => write!(f, "ethereum"),
            ChainType::Solana => write!(f, "solana"),
        }
    }
}

impl FromStr for ChainType {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ethereum" => Ok(ChainType::Ethereum),
            "solana" => Ok(ChainType::Solana),
            other => Err(WalletError::UnsupportedChainType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Devnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Devnet => write!(f, "devnet"),
        }
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "devnet" => Ok(Network::Devnet),
            other => Err(WalletError::InvalidParameter(format!(
                "Invalid network '{}'. Must be 'mainnet' or 'devnet'",
                other
            ))),
        }
    }
}

/// Chain-native encodings: Ethereum uses 0x-prefixed hex, Solana uses Base58.
/// Owned exclusively by the caller that requested derivation; never logged.
#[derive(Debug, Clone, Serialize)]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

/// One scanned derivation index: address, balance in the chain's native unit
/// (ETH or SOL), and the index it was derived at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub address: String,
    pub balance: f64,
    pub index: u32,
}

/// Wallet metadata as the surrounding persistence layer sees it. The core
/// never places a private key in this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletRecord {
    pub id: Uuid,
    pub public_key: String,
    pub chain_type: ChainType,
    pub label: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl WalletRecord {
    pub fn new(
        public_key: String,
        chain_type: ChainType,
        label: Option<String>,
        user_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            public_key,
            chain_type,
            label,
            user_id,
            created_at: Utc::now(),
        }
    }
}
