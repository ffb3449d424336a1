// Gateway configuration loaded from the environment

use std::time::Duration;

use alloy_primitives::{address, Address};
use anyhow::{anyhow, Context, Result};

/// Deployed CrowdFunding contract the UI talks to by default.
pub const DEFAULT_CONTRACT: Address = address!("46edE4f590dE7dd7fE61fDF1556caFc9Fa83Ba7E");

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub rpc_url: String,
    pub contract: Address,
    pub port: u16,
    pub receipt_poll_interval: Duration,
    pub auto_connect: bool,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let rpc_url = lookup("RPC_URL").ok_or_else(|| anyhow!("RPC_URL must be set"))?;

        let contract = match lookup("CONTRACT_ADDRESS") {
            Some(raw) => raw
                .parse::<Address>()
                .with_context(|| format!("invalid CONTRACT_ADDRESS '{}'", raw))?,
            None => DEFAULT_CONTRACT,
        };

        let port = lookup("PORT")
            .unwrap_or_else(|| "4000".to_string())
            .parse::<u16>()
            .context("invalid PORT")?;

        let poll_ms = lookup("RECEIPT_POLL_MS")
            .unwrap_or_else(|| "1000".to_string())
            .parse::<u64>()
            .context("invalid RECEIPT_POLL_MS")?;

        let auto_connect = match lookup("AUTO_CONNECT").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => return Err(anyhow!("invalid AUTO_CONNECT '{}'", other)),
        };

        Ok(Self {
            rpc_url,
            contract,
            port,
            receipt_poll_interval: Duration::from_millis(poll_ms),
            auto_connect,
        })
    }
}
