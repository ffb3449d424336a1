// Conversions between on-chain base units and display values

use alloy_primitives::{
    utils::{format_units, parse_units},
    U256,
};

use crate::error::{GatewayError, Result};

/// Decimal places of the native token.
pub const DECIMALS: u8 = 18;

/// Render a base-unit amount as a display decimal ("10", "0", "1.5").
pub fn format_amount(amount: U256) -> String {
    let formatted = match format_units(amount, DECIMALS) {
        Ok(s) => s,
        // 18 is always a valid unit
        Err(_) => return amount.to_string(),
    };
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Parse a display decimal into base units.
pub fn parse_amount(amount: &str) -> Result<U256> {
    let amount = amount.trim();
    if amount.is_empty() || amount.starts_with('-') {
        return Err(GatewayError::InvalidInput(format!(
            "amount must be a non-negative decimal, got '{}'",
            amount
        )));
    }
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(GatewayError::InvalidInput(format!(
            "amount must contain digits, got '{}'",
            amount
        )));
    }
    if fraction.len() > DECIMALS as usize {
        return Err(GatewayError::InvalidInput(format!(
            "amount '{}' has more than {} decimal places",
            amount, DECIMALS
        )));
    }
    let parsed = parse_units(amount, DECIMALS).map_err(|e| {
        GatewayError::InvalidInput(format!("invalid amount '{}': {}", amount, e))
    })?;
    Ok(parsed.get_absolute())
}

/// Narrow an on-chain integer to `u64`.
pub fn to_u64(value: U256, field: &str) -> Result<u64> {
    if value > U256::from(u64::MAX) {
        return Err(GatewayError::Decode(format!(
            "{} {} does not fit in 64 bits",
            field, value
        )));
    }
    Ok(value.to::<u64>())
}
