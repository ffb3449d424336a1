// Contract-to-domain translation layer
//
// Every operation re-reads the contract; nothing is cached between calls.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use tracing::{error, info, warn};

use crate::abi;
use crate::error::{GatewayError, Result};
use crate::models::{Campaign, CampaignForm, Donation, TxReceipt};
use crate::provider::{ConnectionProvider, ContractHandle};
use crate::units::{format_amount, parse_amount, to_u64};

/// Single handle the UI layer acquires once and calls repeatedly.
pub struct CampaignGateway<P> {
    provider: P,
}

impl<P: ConnectionProvider> CampaignGateway<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn address(&self) -> Option<Address> {
        self.provider.address()
    }

    pub fn contract(&self) -> Address {
        self.provider.contract().address()
    }

    pub async fn connect(&self) -> Result<Address> {
        self.provider.connect().await
    }

    pub async fn disconnect(&self) -> Result<()> {
        self.provider.disconnect().await
    }

    // Writes

    /// Create a campaign owned by the connected caller.
    pub async fn publish_campaign(&self, form: &CampaignForm) -> Result<TxReceipt> {
        let owner = self.caller()?;
        let call = abi::createCampaignCall {
            owner,
            title: form.title.clone(),
            description: form.description.clone(),
            target: form.target_base_units().inspect_err(reject)?,
            deadline: U256::from(form.deadline_millis().inspect_err(reject)?),
            image: form.image.clone(),
        };

        let receipt = self
            .send(owner, call, U256::ZERO)
            .await
            .inspect_err(|e| error!("createCampaign failed: {}", e))?;

        info!("Campaign '{}' published by {}", form.title, owner);
        Ok(receipt)
    }

    /// Donate `amount` (display units) from the connected caller.
    pub async fn donate(&self, campaign_id: u64, amount: &str) -> Result<TxReceipt> {
        let donator = self.caller()?;
        let value = parse_amount(amount).inspect_err(reject)?;
        let call = abi::donateToCampaignCall {
            id: U256::from(campaign_id),
        };

        let receipt = self
            .send(donator, call, value)
            .await
            .inspect_err(|e| error!("donateToCampaign({}) failed: {}", campaign_id, e))?;

        info!("{} donated {} to campaign {}", donator, amount, campaign_id);
        Ok(receipt)
    }

    // Reads

    /// All campaigns, most recently created first.
    pub async fn get_campaigns(&self) -> Result<Vec<Campaign>> {
        let raw = self.call(abi::getCampaignsCall {}).await?.campaigns;

        let mut campaigns = raw
            .into_iter()
            .enumerate()
            .map(|(index, campaign)| Campaign::from_raw(index as u64, campaign))
            .collect::<Result<Vec<_>>>()?;
        campaigns.reverse();

        Ok(campaigns)
    }

    /// Look up one campaign; `Ok(None)` when the contract reports the zero owner.
    pub async fn get_campaign_by_id(&self, id: &str) -> Result<Option<Campaign>> {
        let id = parse_campaign_id(id).inspect_err(reject)?;
        let raw = self
            .call(abi::getCampaignByIdCall { id: U256::from(id) })
            .await?
            .campaign;

        if raw.owner == Address::ZERO {
            return Ok(None);
        }

        Campaign::from_raw(id, raw).map(Some)
    }

    pub async fn get_campaign_count(&self) -> Result<u64> {
        let count = self.call(abi::campaignCountCall {}).await?.count;
        to_u64(count, "campaignCount")
    }

    /// Donor history in contract order.
    pub async fn get_donations(&self, campaign_id: u64) -> Result<Vec<Donation>> {
        let abi::getDonatorsReturn {
            donators,
            donations,
        } = self
            .call(abi::getDonatorsCall {
                id: U256::from(campaign_id),
            })
            .await?;

        donators
            .into_iter()
            .enumerate()
            .map(|(i, donator)| -> Result<Donation> {
                let amount = donations.get(i).ok_or_else(|| {
                    GatewayError::Decode(format!(
                        "donator {} of campaign {} has no donation amount",
                        i, campaign_id
                    ))
                })?;
                Ok(Donation {
                    donator,
                    donation: format_amount(*amount),
                })
            })
            .collect()
    }

    // Derived queries

    pub async fn get_user_campaigns(&self, owner: Address) -> Result<Vec<Campaign>> {
        let campaigns = self.get_campaigns().await?;
        Ok(campaigns.into_iter().filter(|c| c.owner == owner).collect())
    }

    pub async fn get_user_campaign_count(&self, owner: Address) -> Result<usize> {
        Ok(self.get_user_campaigns(owner).await?.len())
    }

    // Contract plumbing

    fn caller(&self) -> Result<Address> {
        self.provider.address().ok_or_else(|| {
            warn!("Rejected write: no wallet connected");
            GatewayError::NotConnected
        })
    }

    async fn call<C: SolCall>(&self, call: C) -> Result<C::Return> {
        let data = self
            .provider
            .contract()
            .call(call.abi_encode().into())
            .await
            .inspect_err(|e| error!("{} failed: {}", C::SIGNATURE, e))?;

        C::abi_decode_returns(&data, true).map_err(|e| {
            error!("{} returned undecodable data: {}", C::SIGNATURE, e);
            GatewayError::from(e)
        })
    }

    async fn send<C: SolCall>(&self, from: Address, call: C, value: U256) -> Result<TxReceipt> {
        self.provider
            .contract()
            .send(from, call.abi_encode().into(), value)
            .await
    }
}

/// Coerce a user-supplied id into a campaign index.
pub fn parse_campaign_id(id: &str) -> Result<u64> {
    id.trim()
        .parse::<u64>()
        .map_err(|_| GatewayError::InvalidInput(format!("'{}' is not a campaign id", id)))
}

fn reject(e: &GatewayError) {
    warn!("Rejected request: {}", e);
}
