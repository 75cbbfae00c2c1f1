//! Balance oracle: one JSON-RPC query per derived address, endpoint chosen
//! by (chain, network) from configuration.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::core::wallet::types::{ChainType, Network};
use crate::utils::config::RpcConfig;
use crate::utils::error::{Result, WalletError};

const WEI_PER_ETH: f64 = 1e18;
const LAMPORTS_PER_SOL: f64 = 1e9;

/// Seam between the scanner and the chain RPC endpoints. Balances are
/// reported in the chain's native unit (ETH or SOL).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BalanceOracle: Send + Sync {
    async fn get_balance(
        &self,
        chain: ChainType,
        network: Network,
        address: &str,
    ) -> Result<f64>;
}

pub struct JsonRpcOracle {
    http: Client,
    endpoints: RpcConfig,
}

impl JsonRpcOracle {
    pub fn new(endpoints: RpcConfig, timeout: std::time::Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::Init(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, endpoints })
    }

    async fn ethereum_balance(&self, url: &str, address: &str) -> Result<f64> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_getBalance",
            "params": [address, "latest"],
        });

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WalletError::BalanceQueryFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WalletError::BalanceQueryFailed(format!(
                "Ethereum RPC returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WalletError::BalanceQueryFailed(e.to_string()))?;

        let hex_wei = body["result"].as_str().ok_or_else(|| {
            WalletError::BalanceQueryFailed("Ethereum RPC response missing result".into())
        })?;
        let wei = u128::from_str_radix(hex_wei.trim_start_matches("0x"), 16)
            .map_err(|e| WalletError::BalanceQueryFailed(format!("Bad wei value: {}", e)))?;

        Ok(wei as f64 / WEI_PER_ETH)
    }

    async fn solana_balance(&self, url: &str, address: &str) -> Result<f64> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getBalance",
            "params": [address],
        });

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WalletError::BalanceQueryFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WalletError::BalanceQueryFailed(format!(
                "Solana RPC returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WalletError::BalanceQueryFailed(e.to_string()))?;

        let lamports = body["result"]["value"].as_u64().ok_or_else(|| {
            WalletError::BalanceQueryFailed("Solana RPC response missing result.value".into())
        })?;

        Ok(lamports as f64 / LAMPORTS_PER_SOL)
    }
}

#[async_trait]
impl BalanceOracle for JsonRpcOracle {
    async fn get_balance(
        &self,
        chain: ChainType,
        network: Network,
        address: &str,
    ) -> Result<f64> {
        let url = self.endpoints.endpoint(chain, network);
        debug!(%chain, %network, address, "Querying balance");

        match chain {
            ChainType::Ethereum => self.ethereum_balance(url, address).await,
            ChainType::Solana => self.solana_balance(url, address).await,
        }
    }
}
