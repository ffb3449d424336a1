// Ethereum JSON-RPC connection provider
//
// Talks to a node that manages the caller's account (eth_sendTransaction is
// signed node-side, the way a browser wallet signs for the page).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client as HttpClient;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::{GatewayError, Result};
use crate::models::TxReceipt;
use crate::provider::{ConnectionProvider, ContractHandle};

const METHOD_NOT_FOUND: i64 = -32601;

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    #[allow(dead_code)]
    jsonrpc: String,
    result: Option<T>,
    error: Option<RpcError>,
    #[allow(dead_code)]
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Minimal JSON-RPC 2.0 client
pub struct RpcClient {
    http_client: HttpClient,
    rpc_url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(rpc_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            rpc_url,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.rpc_url
    }

    /// Issue a request whose result may legitimately be `null`.
    pub async fn request_opt<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<Option<T>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        debug!("RPC {} #{}", method, id);

        let resp = self
            .http_client
            .post(&self.rpc_url)
            .json(&payload)
            .send()
            .await?;

        let rpc_resp: RpcResponse<T> = resp.json().await?;

        if let Some(error) = rpc_resp.error {
            return Err(GatewayError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(rpc_resp.result)
    }

    pub async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        self.request_opt(method, params).await?.ok_or_else(|| {
            GatewayError::Decode(format!("no result in {} response", method))
        })
    }
}

/// Contract handle backed by `eth_call` / `eth_sendTransaction`
pub struct RpcContract {
    rpc: RpcClient,
    address: Address,
    poll_interval: Duration,
}

impl RpcContract {
    pub fn new(rpc: RpcClient, address: Address, poll_interval: Duration) -> Self {
        Self {
            rpc,
            address,
            poll_interval,
        }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    async fn wait_for_receipt(&self, tx_hash: B256) -> Result<TxReceipt> {
        loop {
            let receipt: Option<TxReceipt> = self
                .rpc
                .request_opt("eth_getTransactionReceipt", json!([tx_hash]))
                .await?;

            if let Some(receipt) = receipt {
                return Ok(receipt);
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl ContractHandle for RpcContract {
    fn address(&self) -> Address {
        self.address
    }

    async fn call(&self, data: Bytes) -> Result<Bytes> {
        self.rpc
            .request(
                "eth_call",
                json!([{ "to": self.address, "data": data }, "latest"]),
            )
            .await
    }

    async fn send(&self, from: Address, data: Bytes, value: U256) -> Result<TxReceipt> {
        let tx_hash: B256 = self
            .rpc
            .request(
                "eth_sendTransaction",
                json!([{
                    "from": from,
                    "to": self.address,
                    "data": data,
                    "value": value,
                }]),
            )
            .await?;

        info!("Submitted transaction {}", tx_hash);

        let receipt = self.wait_for_receipt(tx_hash).await?;
        if !receipt.succeeded() {
            return Err(GatewayError::Reverted(tx_hash));
        }

        info!(
            "Transaction {} mined in block {:?}",
            tx_hash, receipt.block_number
        );
        Ok(receipt)
    }
}

/// Connection provider using the node's managed accounts
pub struct RpcWallet {
    contract: RpcContract,
    address: RwLock<Option<Address>>,
}

impl RpcWallet {
    pub fn new(contract: RpcContract) -> Self {
        Self {
            contract,
            address: RwLock::new(None),
        }
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        let rpc = self.contract.rpc();
        match rpc.request("eth_requestAccounts", json!([])).await {
            Err(GatewayError::Rpc { code, .. }) if code == METHOD_NOT_FOUND => {
                warn!("eth_requestAccounts unsupported by node, falling back to eth_accounts");
                rpc.request("eth_accounts", json!([])).await
            }
            other => other,
        }
    }
}

#[async_trait]
impl ConnectionProvider for RpcWallet {
    type Contract = RpcContract;

    fn address(&self) -> Option<Address> {
        *self.address.read()
    }

    async fn connect(&self) -> Result<Address> {
        let account = self
            .accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(GatewayError::NotConnected)?;

        *self.address.write() = Some(account);
        info!("Connected account {}", account);
        Ok(account)
    }

    async fn disconnect(&self) -> Result<()> {
        let previous = self.address.write().take();
        if let Some(account) = previous {
            info!("Disconnected account {}", account);
        }
        Ok(())
    }

    fn contract(&self) -> &RpcContract {
        &self.contract
    }
}
