// Campaign Gateway
// Translation layer between a browser UI and the CrowdFunding contract

pub mod abi;
pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod provider;
pub mod rpc;
pub mod units;

pub use error::{GatewayError, Result};
pub use gateway::CampaignGateway;
pub use models::{Campaign, CampaignForm, Donation, TxReceipt};
pub use provider::{ConnectionProvider, ContractHandle};
pub use rpc::{RpcClient, RpcContract, RpcWallet};
