// Domain models served to the UI

use alloy_primitives::{Address, B256, U256, U64};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::abi;
use crate::error::{GatewayError, Result};
use crate::units::{format_amount, parse_amount, to_u64};

/// Campaign as returned to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: u64,
    pub owner: Address,
    pub title: String,
    pub description: String,
    pub target: String,
    pub deadline: u64,
    pub amount_collected: String,
    pub image: String,
}

impl Campaign {
    /// Normalize an on-chain record, tagging it with the gateway-assigned id.
    pub fn from_raw(id: u64, raw: abi::Campaign) -> Result<Self> {
        Ok(Campaign {
            id,
            owner: raw.owner,
            title: raw.title,
            description: raw.description,
            target: format_amount(raw.target),
            deadline: to_u64(raw.deadline, "deadline")?,
            amount_collected: format_amount(raw.amountCollected),
            image: raw.image,
        })
    }
}

/// One entry of a campaign's donor history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub donator: Address,
    pub donation: String,
}

/// Input for creating a campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignForm {
    pub title: String,
    pub description: String,
    /// Funding goal in display units, e.g. "0.5"
    pub target: String,
    /// RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC)
    pub deadline: String,
    pub image: String,
}

impl CampaignForm {
    pub fn target_base_units(&self) -> Result<U256> {
        parse_amount(&self.target)
    }

    pub fn deadline_millis(&self) -> Result<u64> {
        let raw = self.deadline.trim();
        let deadline = if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            ts.with_timezone(&Utc)
        } else if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            date.and_hms_opt(0, 0, 0)
                .ok_or_else(|| GatewayError::InvalidInput(format!("invalid deadline '{}'", raw)))?
                .and_utc()
        } else {
            return Err(GatewayError::InvalidInput(format!(
                "deadline must be an RFC 3339 timestamp or YYYY-MM-DD date, got '{}'",
                raw
            )));
        };

        u64::try_from(deadline.timestamp_millis()).map_err(|_| {
            GatewayError::InvalidInput(format!("deadline '{}' is before the epoch", raw))
        })
    }
}

/// Donation request body
#[derive(Debug, Deserialize)]
pub struct DonateRequest {
    pub amount: String,
}

/// Receipt of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<U64>,
    pub gas_used: Option<U256>,
    pub status: Option<U64>,
}

impl TxReceipt {
    /// Pre-Byzantium receipts carry no status and are treated as successful.
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |s| s != U64::ZERO)
    }
}

/// Connected identity and contract passthrough
#[derive(Debug, Serialize)]
pub struct WalletInfo {
    pub address: Option<Address>,
    pub contract: Address,
}

/// Count response
#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}
