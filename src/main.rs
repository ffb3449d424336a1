// Campaign Gateway Server
// Serves campaign reads and writes to the UI over HTTP

use std::sync::Arc;

use anyhow::Result;
use campaign_gateway::{
    api, config::GatewayConfig, CampaignGateway, RpcClient, RpcContract, RpcWallet,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("campaign_gateway=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("Starting Campaign Gateway");

    let config = GatewayConfig::from_env()?;

    info!("Configuration:");
    info!("  RPC: {}", config.rpc_url);
    info!("  Contract: {}", config.contract);
    info!("  Server Port: {}", config.port);
    info!("  Receipt poll interval: {:?}", config.receipt_poll_interval);

    let contract = RpcContract::new(
        RpcClient::new(config.rpc_url.clone()),
        config.contract,
        config.receipt_poll_interval,
    );
    let gateway = Arc::new(CampaignGateway::new(RpcWallet::new(contract)));

    if config.auto_connect {
        match gateway.connect().await {
            Ok(address) => info!("Auto-connected {}", address),
            Err(e) => warn!("Auto-connect failed, writes disabled until /api/wallet/connect: {}", e),
        }
    }

    let app = api::router(gateway);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Campaign Gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
