pub mod api;
pub mod core;
pub mod rpc;
pub mod utils;

use std::sync::Arc;

use tracing::info;

use crate::{
    core::services::{VaultService, WalletService},
    rpc::JsonRpcOracle,
    utils::{
        config::Config,
        error::{Result, WalletError},
    },
};

pub struct Application {
    config: Arc<Config>,
    wallet_service: Arc<WalletService>,
    vault_service: Arc<VaultService>,
}

impl Application {
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        info!("Initializing balance oracle...");
        let oracle = Arc::new(JsonRpcOracle::new(
            config.rpc.clone(),
            config.request_timeout(),
        )?);

        info!("Initializing services...");
        let wallet_service = Arc::new(WalletService::new(config.clone(), oracle));
        let vault_service = Arc::new(VaultService::new(&config.biometric));

        Ok(Self {
            config,
            wallet_service,
            vault_service,
        })
    }

    pub async fn run(&self) -> Result<()> {
        use actix_web::{web, App, HttpServer};
        use crate::api::handlers;

        let wallet_service = self.wallet_service.clone();
        let vault_service = self.vault_service.clone();

        info!(
            host = %self.config.node.host,
            port = self.config.node.port,
            "Starting API server"
        );

        HttpServer::new(move || {
            App::new()
                .wrap(actix_cors::Cors::permissive())
                .app_data(web::Data::from(wallet_service.clone()))
                .app_data(web::Data::from(vault_service.clone()))
                .service(handlers::wallet::scope())
                .service(handlers::vault::scope())
        })
        .bind((self.config.node.host.as_str(), self.config.node.port))
        .map_err(|e| WalletError::Init(format!("Failed to bind API server: {}", e)))?
        .run()
        .await
        .map_err(|e| WalletError::Init(format!("API server error: {}", e)))
    }
}
