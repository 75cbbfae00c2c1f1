use facevault::{utils::config::Config, Application};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::new().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.node.log_level.clone())),
        )
        .with_target(true)
        .with_level(true)
        .init();

    info!("Starting Facevault v{}", env!("CARGO_PKG_VERSION"));

    let app = Application::new(config).map_err(|e| {
        error!("Failed to initialize application: {}", e);
        e
    })?;

    app.run().await.map_err(|e| {
        error!("Application error: {}", e);
        e
    })?;

    info!("Application shutdown complete");
    Ok(())
}
