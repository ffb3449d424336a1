// Seams between the gateway and the chain

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;

use crate::error::Result;
use crate::models::TxReceipt;

/// Callable handle bound to one deployed contract address.
#[async_trait]
pub trait ContractHandle: Send + Sync {
    fn address(&self) -> Address;

    /// Read-only call with ABI-encoded calldata; returns the raw return data.
    async fn call(&self, data: Bytes) -> Result<Bytes>;

    /// Submit a state-changing call from `from` with `value` attached and
    /// wait until it is mined.
    async fn send(&self, from: Address, data: Bytes, value: U256) -> Result<TxReceipt>;
}

/// Supplies the caller identity and the contract handle.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    type Contract: ContractHandle;

    /// Currently connected identity, if any.
    fn address(&self) -> Option<Address>;

    async fn connect(&self) -> Result<Address>;

    async fn disconnect(&self) -> Result<()>;

    fn contract(&self) -> &Self::Contract;
}
