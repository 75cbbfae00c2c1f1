use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::core::wallet::{
    derive_keypair, generate_mnemonic, mnemonic_to_seed, parse_mnemonic,
    scanner::AccountScanner, AccountInfo, ChainType, Network,
};
use crate::rpc::BalanceOracle;
use crate::utils::config::Config;
use crate::utils::error::Result;

/// Wallet creation output. The mnemonic and private key appear exactly once,
/// in the response that delivers them; nothing here is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedWallet {
    pub public_key: String,
    pub private_key: String,
    pub mnemonic: String,
}

pub struct WalletService {
    config: Arc<Config>,
    scanner: AccountScanner,
}

impl WalletService {
    pub fn new(config: Arc<Config>, oracle: Arc<dyn BalanceOracle>) -> Self {
        Self {
            config,
            scanner: AccountScanner::new(oracle),
        }
    }

    /// Create (or restore) the account-0 wallet for a chain. When no phrase
    /// is supplied a fresh mnemonic is generated; a supplied phrase is
    /// checksum-validated first.
    pub fn create_wallet(
        &self,
        chain: ChainType,
        phrase: Option<&str>,
    ) -> Result<CreatedWallet> {
        let mnemonic = match phrase {
            Some(p) => parse_mnemonic(p)?,
            None => generate_mnemonic()?,
        };

        let seed = mnemonic_to_seed(&mnemonic, "");
        let keypair = derive_keypair(&seed, chain, 0)?;

        info!(%chain, public_key = %keypair.public_key, "Wallet created");

        Ok(CreatedWallet {
            public_key: keypair.public_key,
            private_key: keypair.private_key,
            mnemonic: mnemonic.to_string(),
        })
    }

    /// Scan the configured window of derivation indices for existing
    /// accounts, reporting every index with its balance.
    pub async fn scan_wallets(
        &self,
        phrase: &str,
        chain: ChainType,
        network: Network,
        start_index: u32,
    ) -> Result<Vec<AccountInfo>> {
        let mnemonic = parse_mnemonic(phrase)?;
        self.scanner
            .scan(
                &mnemonic,
                chain,
                network,
                start_index,
                self.config.scanner.max_accounts,
            )
            .await
    }
}
