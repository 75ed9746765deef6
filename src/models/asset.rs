use alloy::primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::UnitError;
use crate::utils::math;

/// Key used to look an asset up in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetId {
    /// Registry id such as `usdc` or `weth`; always stored lowercase.
    Symbol(String),
    Address(Address),
}

impl AssetId {
    pub fn symbol(symbol: &str) -> Self {
        AssetId::Symbol(symbol.to_lowercase())
    }
}

impl From<Address> for AssetId {
    fn from(address: Address) -> Self {
        AssetId::Address(address)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Symbol(symbol) => f.write_str(symbol),
            AssetId::Address(address) => write!(f, "{}", address),
        }
    }
}

/// ERC-20 token metadata as returned by the asset registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub asset_id: String,
    pub decimals: u8,
    pub contract_address: Address,
}

impl Asset {
    pub fn new(asset_id: &str, decimals: u8, contract_address: Address) -> Self {
        Self {
            asset_id: asset_id.to_lowercase(),
            decimals,
            contract_address,
        }
    }

    pub fn from_atomic_amount(&self, atomic: U256) -> Result<Decimal, UnitError> {
        math::from_atomic(atomic, self.decimals)
    }

    pub fn matches(&self, id: &AssetId) -> bool {
        match id {
            AssetId::Symbol(symbol) => self.asset_id.eq_ignore_ascii_case(symbol),
            AssetId::Address(address) => self.contract_address == *address,
        }
    }
}
