use alloy::primitives::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::UnitError;

/// Decimal places of a Comet price feed answer.
pub const PRICE_FEED_DECIMALS: u32 = 8;

/// Decimal places of a Comet collateral factor (1e18 == 100%).
pub const FACTOR_DECIMALS: u32 = 18;

const MAX_SCALE: u32 = 28;

/// Convert a raw on-chain integer into a decimal by shifting `scale` places.
///
/// The conversion is exact; values beyond the 96-bit mantissa of `Decimal`
/// are rejected instead of rounded.
pub fn scale_down(raw: U256, scale: u32) -> Result<Decimal, UnitError> {
    if scale > MAX_SCALE {
        return Err(UnitError::UnsupportedDecimals(scale));
    }
    let mantissa = u128::try_from(raw)
        .ok()
        .and_then(|value| i128::try_from(value).ok())
        .ok_or_else(|| UnitError::Overflow(raw.to_string()))?;
    let value = Decimal::try_from_i128_with_scale(mantissa, scale)
        .map_err(|_| UnitError::Overflow(raw.to_string()))?;
    Ok(value.normalize())
}

/// Atomic token units to human units for a token with `decimals` places.
pub fn from_atomic(raw: U256, decimals: u8) -> Result<Decimal, UnitError> {
    scale_down(raw, u32::from(decimals))
}

/// Human units to atomic token units, truncating any precision the token
/// cannot represent.
pub fn to_atomic(human: Decimal, decimals: u8) -> Result<U256, UnitError> {
    let decimals = u32::from(decimals);
    if decimals > MAX_SCALE {
        return Err(UnitError::UnsupportedDecimals(decimals));
    }
    if human.is_sign_negative() && !human.is_zero() {
        return Err(UnitError::Negative(human.to_string()));
    }
    let factor = Decimal::try_from_i128_with_scale(10_i128.pow(decimals), 0)
        .map_err(|_| UnitError::UnsupportedDecimals(decimals))?;
    let whole = human
        .checked_mul(factor)
        .map(|scaled| scaled.trunc())
        .and_then(|scaled| scaled.to_u128())
        .ok_or_else(|| UnitError::Overflow(human.to_string()))?;
    Ok(U256::from(whole))
}

/// 8-decimal price feed answer to USD.
pub fn normalize_price(raw: U256) -> Result<Decimal, UnitError> {
    scale_down(raw, PRICE_FEED_DECIMALS)
}

const FACTOR_SCALE: u64 = 1_000_000_000_000_000_000;

/// 1e18-scaled collateral factor to a fraction in [0, 1].
pub fn normalize_factor(raw: u64) -> Result<Decimal, UnitError> {
    if raw > FACTOR_SCALE {
        return Err(UnitError::FactorOutOfRange(raw));
    }
    scale_down(U256::from(raw), FACTOR_DECIMALS)
}

/// Parse a user-supplied decimal amount such as `"0.125"` or `"1e-3"`.
pub fn parse_amount(input: &str) -> Result<Decimal, UnitError> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| UnitError::InvalidAmount(input.to_string()))
}

/// Fixed-point rendering with banker's rounding, e.g. `format_fixed(1.5, 2) == "1.50"`.
pub fn format_fixed(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven);
    format!("{:.*}", places as usize, rounded)
}
