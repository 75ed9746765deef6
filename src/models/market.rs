use alloy::primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::network::Network;
use crate::adapters::compound_v3::contracts::IComet;
use crate::error::UnitError;
use crate::utils::math;

/// Per-collateral configuration as returned by `Comet.getAssetInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub offset: u8,
    pub asset: Address,
    pub price_feed: Address,
    pub scale: u64,
    /// Raw 1e18-scaled fraction.
    pub borrow_collateral_factor: u64,
    /// Raw 1e18-scaled fraction.
    pub liquidate_collateral_factor: u64,
    pub liquidation_factor: u64,
    pub supply_cap: u128,
}

impl AssetInfo {
    pub fn borrow_collateral_factor(&self) -> Result<Decimal, UnitError> {
        math::normalize_factor(self.borrow_collateral_factor)
    }
}

impl From<IComet::AssetInfo> for AssetInfo {
    fn from(info: IComet::AssetInfo) -> Self {
        Self {
            offset: info.offset,
            asset: info.asset,
            price_feed: info.priceFeed,
            scale: info.scale,
            borrow_collateral_factor: info.borrowCollateralFactor,
            liquidate_collateral_factor: info.liquidateCollateralFactor,
            liquidation_factor: info.liquidationFactor,
            supply_cap: info.supplyCap,
        }
    }
}

/// Snapshot of one Comet market: its base asset and ordered collateral list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub address: Address,
    pub network: Network,
    pub base_token: Address,
    pub base_token_price_feed: Address,
    pub collateral_assets: Vec<AssetInfo>,
}

impl Market {
    pub fn num_assets(&self) -> usize {
        self.collateral_assets.len()
    }

    pub fn collateral(&self, asset: Address) -> Option<&AssetInfo> {
        self.collateral_assets.iter().find(|info| info.asset == asset)
    }
}
