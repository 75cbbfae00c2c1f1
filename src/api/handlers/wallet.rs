use actix_web::{
    web::{self, Data, Json},
    HttpResponse, Scope,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::{
    api::to_http_error,
    core::services::WalletService,
    core::wallet::types::{ChainType, Network},
};

#[derive(Debug, Deserialize)]
pub struct CreateWalletRequest {
    pub chain_type: String,
    pub mnemonic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScanWalletsRequest {
    pub mnemonic: String,
    pub chain_type: String,
    #[serde(default = "default_network")]
    pub network: String,
    #[serde(default)]
    pub start_index: u32,
}

fn default_network() -> String {
    "devnet".to_string()
}

pub fn scope() -> Scope {
    web::scope("/wallet")
        .service(web::resource("/create").route(web::post().to(create_wallet)))
        .service(web::resource("/scan").route(web::post().to(scan_wallets)))
}

async fn create_wallet(
    service: Data<WalletService>,
    request: Json<CreateWalletRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let chain: ChainType = request.chain_type.parse().map_err(to_http_error)?;
    info!(%chain, "Received wallet creation request");

    let wallet = service
        .create_wallet(chain, request.mnemonic.as_deref())
        .map_err(|e| {
            error!(%chain, "Wallet creation failed: {}", e);
            to_http_error(e)
        })?;

    Ok(HttpResponse::Created().json(wallet))
}

async fn scan_wallets(
    service: Data<WalletService>,
    request: Json<ScanWalletsRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let chain: ChainType = request.chain_type.parse().map_err(to_http_error)?;
    let network: Network = request.network.parse().map_err(to_http_error)?;
    info!(%chain, %network, start_index = request.start_index, "Received scan request");

    let accounts = service
        .scan_wallets(&request.mnemonic, chain, network, request.start_index)
        .await
        .map_err(|e| {
            error!(%chain, %network, "Wallet scan failed: {}", e);
            to_http_error(e)
        })?;

    Ok(HttpResponse::Ok().json(accounts))
}
