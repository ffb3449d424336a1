// HTTP handlers exposing the gateway to the browser UI

use std::sync::Arc;

use alloy_primitives::Address;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::error::{GatewayError, Result};
use crate::gateway::{parse_campaign_id, CampaignGateway};
use crate::models::{
    Campaign, CampaignForm, CountResponse, DonateRequest, Donation, TxReceipt, WalletInfo,
};
use crate::provider::ConnectionProvider;

type Gateway<P> = State<Arc<CampaignGateway<P>>>;

/// Build the router for a gateway.
pub fn router<P>(gateway: Arc<CampaignGateway<P>>) -> Router
where
    P: ConnectionProvider + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check::<P>))
        // Wallet passthrough
        .route("/api/wallet", get(wallet_info::<P>))
        .route("/api/wallet/connect", post(connect::<P>))
        .route("/api/wallet/disconnect", post(disconnect::<P>))
        // Campaigns
        .route(
            "/api/campaigns",
            get(list_campaigns::<P>).post(publish_campaign::<P>),
        )
        .route("/api/campaigns/count", get(campaign_count::<P>))
        .route("/api/campaigns/:id", get(campaign_by_id::<P>))
        .route("/api/campaigns/:id/donations", get(donations::<P>))
        .route("/api/campaigns/:id/donate", post(donate::<P>))
        // Derived queries
        .route("/api/user/campaigns", get(my_campaigns::<P>))
        .route("/api/users/:owner/campaigns", get(user_campaigns::<P>))
        .route(
            "/api/users/:owner/campaigns/count",
            get(user_campaign_count::<P>),
        )
        .with_state(gateway)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Health check endpoint
async fn health_check<P: ConnectionProvider>(State(gateway): Gateway<P>) -> impl IntoResponse {
    let contract_health = match gateway.get_campaign_count().await {
        Ok(_) => true,
        Err(e) => {
            error!("Health check contract read failed: {}", e);
            false
        }
    };

    Json(json!({
        "status": if contract_health { "healthy" } else { "unhealthy" },
        "contract": gateway.contract(),
        "connected": gateway.address().is_some(),
    }))
}

async fn wallet_info<P: ConnectionProvider>(State(gateway): Gateway<P>) -> Json<WalletInfo> {
    Json(WalletInfo {
        address: gateway.address(),
        contract: gateway.contract(),
    })
}

async fn connect<P: ConnectionProvider>(State(gateway): Gateway<P>) -> Result<Json<WalletInfo>> {
    let address = gateway.connect().await?;
    Ok(Json(WalletInfo {
        address: Some(address),
        contract: gateway.contract(),
    }))
}

async fn disconnect<P: ConnectionProvider>(State(gateway): Gateway<P>) -> Result<StatusCode> {
    gateway.disconnect().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_campaigns<P: ConnectionProvider>(
    State(gateway): Gateway<P>,
) -> Result<Json<Vec<Campaign>>> {
    Ok(Json(gateway.get_campaigns().await?))
}

async fn publish_campaign<P: ConnectionProvider>(
    State(gateway): Gateway<P>,
    Json(form): Json<CampaignForm>,
) -> Result<(StatusCode, Json<TxReceipt>)> {
    info!("Publishing campaign '{}'", form.title);
    let receipt = gateway.publish_campaign(&form).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

async fn campaign_count<P: ConnectionProvider>(
    State(gateway): Gateway<P>,
) -> Result<Json<CountResponse>> {
    let count = gateway.get_campaign_count().await?;
    Ok(Json(CountResponse { count }))
}

async fn campaign_by_id<P: ConnectionProvider>(
    State(gateway): Gateway<P>,
    Path(id): Path<String>,
) -> Result<Response> {
    Ok(match gateway.get_campaign_by_id(&id).await? {
        Some(campaign) => Json(campaign).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("campaign {} not found", id),
                "kind": "not_found",
            })),
        )
            .into_response(),
    })
}

async fn donations<P: ConnectionProvider>(
    State(gateway): Gateway<P>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Donation>>> {
    let id = parse_campaign_id(&id)?;
    Ok(Json(gateway.get_donations(id).await?))
}

async fn donate<P: ConnectionProvider>(
    State(gateway): Gateway<P>,
    Path(id): Path<String>,
    Json(req): Json<DonateRequest>,
) -> Result<Json<TxReceipt>> {
    let id = parse_campaign_id(&id)?;
    Ok(Json(gateway.donate(id, &req.amount).await?))
}

async fn my_campaigns<P: ConnectionProvider>(
    State(gateway): Gateway<P>,
) -> Result<Json<Vec<Campaign>>> {
    let owner = gateway.address().ok_or(GatewayError::NotConnected)?;
    Ok(Json(gateway.get_user_campaigns(owner).await?))
}

async fn user_campaigns<P: ConnectionProvider>(
    State(gateway): Gateway<P>,
    Path(owner): Path<String>,
) -> Result<Json<Vec<Campaign>>> {
    let owner = parse_owner(&owner)?;
    Ok(Json(gateway.get_user_campaigns(owner).await?))
}

async fn user_campaign_count<P: ConnectionProvider>(
    State(gateway): Gateway<P>,
    Path(owner): Path<String>,
) -> Result<Json<CountResponse>> {
    let owner = parse_owner(&owner)?;
    let count = gateway.get_user_campaign_count(owner).await?;
    Ok(Json(CountResponse {
        count: count as u64,
    }))
}

fn parse_owner(owner: &str) -> Result<Address> {
    owner
        .parse::<Address>()
        .map_err(|e| GatewayError::InvalidInput(format!("invalid address '{}': {}", owner, e)))
}
