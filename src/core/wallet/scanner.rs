//! Bounded-window account scanning.
//!
//! The scan window is fixed-size: exactly `max_accounts` indices are queried,
//! used and unused alike, and returned in strictly increasing index order.
//! There is no gap-limit stopping rule; callers read a non-zero balance as
//! evidence of prior use.

use std::sync::Arc;

use bip39::Mnemonic;
use futures::future::try_join_all;
use tracing::info;

use crate::core::wallet::derivation::derive_keypair;
use crate::core::wallet::mnemonic::mnemonic_to_seed;
use crate::core::wallet::types::{AccountInfo, ChainType, Network};
use crate::rpc::BalanceOracle;
use crate::utils::error::{Result, WalletError};

pub const DEFAULT_SCAN_WINDOW: u32 = 10;

pub struct AccountScanner {
    oracle: Arc<dyn BalanceOracle>,
}

impl AccountScanner {
    pub fn new(oracle: Arc<dyn BalanceOracle>) -> Self {
        Self { oracle }
    }

    /// Scan `max_accounts` consecutive derivation indices starting at
    /// `start_index`. Balance queries run concurrently but results are
    /// reassembled in index order. A single failed query aborts the whole
    /// scan; in-flight queries are dropped (fail-fast, no partial results).
    pub async fn scan(
        &self,
        mnemonic: &Mnemonic,
        chain: ChainType,
        network: Network,
        start_index: u32,
        max_accounts: u32,
    ) -> Result<Vec<AccountInfo>> {
        if max_accounts == 0 {
            return Err(WalletError::InvalidParameter(
                "max_accounts must be greater than 0".into(),
            ));
        }
        let end_index = start_index.checked_add(max_accounts).ok_or_else(|| {
            WalletError::InvalidParameter("Scan window exceeds index range".into())
        })?;

        info!(%chain, %network, start_index, max_accounts, "Scanning accounts");

        // Derivation is pure and cheap; do it up front, in order.
        let seed = mnemonic_to_seed(mnemonic, "");
        let addresses = (start_index..end_index)
            .map(|index| Ok(derive_keypair(&seed, chain, index)?.public_key))
            .collect::<Result<Vec<_>>>()?;

        let balances = try_join_all(
            addresses
                .iter()
                .map(|address| self.oracle.get_balance(chain, network, address)),
        )
        .await?;

        Ok(addresses
            .into_iter()
            .zip(balances)
            .zip(start_index..end_index)
            .map(|((address, balance), index)| AccountInfo {
                address,
                balance,
                index,
            })
            .collect())
    }
}
