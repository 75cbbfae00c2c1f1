use config::{Config as ConfigLib, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::core::wallet::types::{ChainType, Network};
use crate::utils::error::{Result, WalletError};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub node: NodeConfig,
    pub rpc: RpcConfig,
    pub scanner: ScannerConfig,
    pub biometric: BiometricConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

/// Balance-oracle endpoints, one per chain/network pair.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    pub ethereum_mainnet: String,
    pub ethereum_devnet: String,
    pub solana_mainnet: String,
    pub solana_devnet: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    pub max_accounts: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BiometricConfig {
    pub descriptor_length: usize,
    pub match_threshold: f64,
    pub capture_deadline_secs: u64,
}

impl Config {
    pub fn new() -> Result<Self> {
        let config = ConfigLib::builder()
            // Start with default values
            .set_default("node.host", "127.0.0.1")?
            .set_default("node.port", 8080)?
            .set_default("node.log_level", "info")?
            .set_default("rpc.ethereum_mainnet", "https://eth-mainnet.g.alchemy.com/v2/YOUR-API-KEY")?
            .set_default("rpc.ethereum_devnet", "https://eth-sepolia.g.alchemy.com/v2/YOUR-API-KEY")?
            .set_default("rpc.solana_mainnet", "https://api.mainnet-beta.solana.com")?
            .set_default("rpc.solana_devnet", "https://api.devnet.solana.com")?
            .set_default("rpc.request_timeout_secs", 30)?
            .set_default(
                "scanner.max_accounts",
                crate::core::wallet::DEFAULT_SCAN_WINDOW as i64,
            )?
            .set_default("biometric.descriptor_length", 128)?
            .set_default("biometric.match_threshold", 0.6)?
            .set_default("biometric.capture_deadline_secs", 15)?
            // Load from config file
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (e.g., APP_NODE_PORT)
            .add_source(Environment::with_prefix("APP").separator("_"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.node.port == 0 {
            return Err(WalletError::Config("Invalid port number".into()));
        }
        if self.scanner.max_accounts == 0 {
            return Err(WalletError::Config(
                "scanner.max_accounts must be greater than 0".into(),
            ));
        }
        if self.biometric.descriptor_length == 0 {
            return Err(WalletError::Config(
                "biometric.descriptor_length must be greater than 0".into(),
            ));
        }
        if self.biometric.match_threshold <= 0.0 {
            return Err(WalletError::Config(
                "biometric.match_threshold must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc.request_timeout_secs)
    }
}

impl BiometricConfig {
    pub fn capture_deadline(&self) -> Duration {
        Duration::from_secs(self.capture_deadline_secs)
    }
}

impl RpcConfig {
    pub fn endpoint(&self, chain: ChainType, network: Network) -> &str {
        match (chain, network) {
            (ChainType::Ethereum, Network::Mainnet) => &self.ethereum_mainnet,
            (ChainType::Ethereum, Network::Devnet) => &self.ethereum_devnet,
            (ChainType::Solana, Network::Mainnet) => &self.solana_mainnet,
            (ChainType::Solana, Network::Devnet) => &self.solana_devnet,
        }
    }
}

impl From<ConfigError> for WalletError {
    fn from(error: ConfigError) -> Self {
        WalletError::Config(error.to_string())
    }
}
