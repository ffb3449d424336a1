// In-memory CrowdFunding contract executing ABI calldata

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use alloy_primitives::{address, Address, Bytes, B256, U256, U64};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use campaign_gateway::{
    abi, ConnectionProvider, ContractHandle, GatewayError, Result, TxReceipt,
};
use parking_lot::{Mutex, RwLock};

pub const ALICE: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
pub const BOB: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
pub const CONTRACT: Address = address!("cccccccccccccccccccccccccccccccccccccccc");

pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18))
}

fn reverted() -> GatewayError {
    GatewayError::Rpc {
        code: 3,
        message: "execution reverted".to_string(),
    }
}

fn index(id: U256, len: usize) -> Option<usize> {
    (id < U256::from(len)).then(|| id.to::<usize>())
}

fn empty_campaign() -> abi::Campaign {
    abi::Campaign {
        owner: Address::ZERO,
        title: String::new(),
        description: String::new(),
        target: U256::ZERO,
        deadline: U256::ZERO,
        amountCollected: U256::ZERO,
        image: String::new(),
        donators: vec![],
        donations: vec![],
    }
}

#[derive(Default)]
pub struct SimulatedContract {
    campaigns: Mutex<Vec<abi::Campaign>>,
    calls: AtomicUsize,
    sends: AtomicUsize,
    blocks: AtomicU64,
    offline: AtomicBool,
}

impl SimulatedContract {
    /// Total contract interactions, reads and writes.
    pub fn interactions(&self) -> usize {
        self.calls.load(Ordering::SeqCst) + self.sends.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Insert a raw record, bypassing the contract entry points.
    pub fn push_raw(&self, campaign: abi::Campaign) {
        self.campaigns.lock().push(campaign);
    }

    pub fn seed(&self, owner: Address, title: &str, target: U256) {
        self.push_raw(abi::Campaign {
            owner,
            title: title.to_string(),
            description: format!("{} description", title),
            target,
            deadline: U256::from(1_900_000_000_000u64),
            image: format!("https://img/{}", title),
            ..empty_campaign()
        });
    }

    pub fn raw(&self, id: usize) -> abi::Campaign {
        self.campaigns.lock()[id].clone()
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(GatewayError::Rpc {
                code: -32000,
                message: "node unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn selector(data: &[u8]) -> Result<[u8; 4]> {
        data.get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(reverted)
    }

    fn execute(&self, from: Address, data: &[u8], value: U256) -> Result<()> {
        let selector = Self::selector(data)?;
        let mut campaigns = self.campaigns.lock();

        if selector == abi::createCampaignCall::SELECTOR {
            let call = abi::createCampaignCall::abi_decode(data, true)?;
            campaigns.push(abi::Campaign {
                owner: call.owner,
                title: call.title,
                description: call.description,
                target: call.target,
                deadline: call.deadline,
                image: call.image,
                ..empty_campaign()
            });
            Ok(())
        } else if selector == abi::donateToCampaignCall::SELECTOR {
            let call = abi::donateToCampaignCall::abi_decode(data, true)?;
            let id = index(call.id, campaigns.len()).ok_or_else(reverted)?;
            let campaign = &mut campaigns[id];
            campaign.donators.push(from);
            campaign.donations.push(value);
            campaign.amountCollected += value;
            Ok(())
        } else {
            Err(reverted())
        }
    }
}

#[async_trait]
impl ContractHandle for SimulatedContract {
    fn address(&self) -> Address {
        CONTRACT
    }

    async fn call(&self, data: Bytes) -> Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;

        let selector = Self::selector(&data)?;
        let campaigns = self.campaigns.lock();

        let out = if selector == abi::getCampaignsCall::SELECTOR {
            abi::getCampaignsCall::abi_encode_returns(&(campaigns.clone(),))
        } else if selector == abi::getCampaignByIdCall::SELECTOR {
            let call = abi::getCampaignByIdCall::abi_decode(&data, true)?;
            let campaign = index(call.id, campaigns.len())
                .map(|id| campaigns[id].clone())
                .unwrap_or_else(empty_campaign);
            abi::getCampaignByIdCall::abi_encode_returns(&(campaign,))
        } else if selector == abi::campaignCountCall::SELECTOR {
            abi::campaignCountCall::abi_encode_returns(&(U256::from(campaigns.len()),))
        } else if selector == abi::getDonatorsCall::SELECTOR {
            let call = abi::getDonatorsCall::abi_decode(&data, true)?;
            let campaign = index(call.id, campaigns.len())
                .map(|id| campaigns[id].clone())
                .unwrap_or_else(empty_campaign);
            abi::getDonatorsCall::abi_encode_returns(&(campaign.donators, campaign.donations))
        } else {
            return Err(reverted());
        };

        Ok(out.into())
    }

    async fn send(&self, from: Address, data: Bytes, value: U256) -> Result<TxReceipt> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        self.execute(from, &data, value)?;

        let block = self.blocks.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TxReceipt {
            transaction_hash: B256::left_padding_from(&block.to_be_bytes()),
            block_number: Some(U64::from(block)),
            gas_used: Some(U256::from(21_000)),
            status: Some(U64::from(1)),
        })
    }
}

/// Wallet that connects a fixed account
pub struct SimulatedWallet {
    contract: SimulatedContract,
    account: RwLock<Address>,
    connected: RwLock<Option<Address>>,
}

impl SimulatedWallet {
    pub fn new(account: Address) -> Self {
        Self {
            contract: SimulatedContract::default(),
            account: RwLock::new(account),
            connected: RwLock::new(None),
        }
    }

    pub fn connected(account: Address) -> Self {
        let wallet = Self::new(account);
        *wallet.connected.write() = Some(account);
        wallet
    }

    /// Change the account the next `connect` picks up and the current identity.
    pub fn switch_account(&self, account: Address) {
        *self.account.write() = account;
        *self.connected.write() = Some(account);
    }
}

#[async_trait]
impl ConnectionProvider for SimulatedWallet {
    type Contract = SimulatedContract;

    fn address(&self) -> Option<Address> {
        *self.connected.read()
    }

    async fn connect(&self) -> Result<Address> {
        let account = *self.account.read();
        *self.connected.write() = Some(account);
        Ok(account)
    }

    async fn disconnect(&self) -> Result<()> {
        *self.connected.write() = None;
        Ok(())
    }

    fn contract(&self) -> &SimulatedContract {
        &self.contract
    }
}
