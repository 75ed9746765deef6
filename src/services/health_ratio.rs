use alloy::primitives::{Address, U256};
use futures::try_join;
use rust_decimal::Decimal;
use tracing::debug;

use super::position_reader::PositionReader;
use crate::blockchain::AssetRegistry;
use crate::error::EngineError;
use crate::models::{AssetId, HealthRatio, Position};

/// Current health ratio of a position.
pub fn health_ratio(position: &Position) -> HealthRatio {
    HealthRatio::from_values(position.collateral_value(), position.borrow.value())
}

/// Ratio after borrowing `additional` more of the base asset, collateral unchanged.
pub fn health_ratio_after_borrow(position: &Position, additional: Decimal) -> HealthRatio {
    let new_borrow_value = (position.borrow.amount + additional) * position.borrow.price;
    HealthRatio::from_values(position.collateral_value(), new_borrow_value)
}

/// Ratio after withdrawing `amount` of the supply entry whose symbol matches
/// `symbol`. The entry is floored at zero. The borrow side is left as is,
/// even when `symbol` names the base asset.
pub fn health_ratio_after_withdraw(position: &Position, symbol: &str, amount: Decimal) -> HealthRatio {
    let collateral_value: Decimal = position
        .supplies
        .iter()
        .map(|supply| {
            let remaining = if supply.symbol.eq_ignore_ascii_case(symbol) {
                (supply.amount - amount).max(Decimal::ZERO)
            } else {
                supply.amount
            };
            remaining * supply.price * supply.collateral_factor
        })
        .sum();

    HealthRatio::from_values(collateral_value, position.borrow.value())
}

/// Health ratio queries against live market state.
pub struct HealthRatioEngine<'a> {
    positions: PositionReader<'a>,
    registry: &'a dyn AssetRegistry,
}

impl<'a> HealthRatioEngine<'a> {
    pub fn new(positions: PositionReader<'a>, registry: &'a dyn AssetRegistry) -> Self {
        Self { positions, registry }
    }

    pub async fn health_ratio(&self, comet: Address, account: Address) -> Result<HealthRatio, EngineError> {
        let position = self.positions.position(comet, account).await?;
        Ok(health_ratio(&position))
    }

    /// `additional_atomic` is scaled with the base asset's decimals.
    pub async fn health_ratio_after_borrow(
        &self,
        comet: Address,
        account: Address,
        additional_atomic: U256,
    ) -> Result<HealthRatio, EngineError> {
        let (position, market) = try_join!(
            self.positions.position(comet, account),
            self.positions.market(comet),
        )?;
        let base_asset = self
            .registry
            .fetch(self.positions.network(), &AssetId::from(market.base_token))
            .await?;
        let additional = base_asset.from_atomic_amount(additional_atomic)?;

        let projected = health_ratio_after_borrow(&position, additional);
        debug!(
            market = %comet,
            account = %account,
            additional = %additional,
            projected = %projected,
            "Projected health ratio after borrow"
        );
        Ok(projected)
    }

    pub async fn health_ratio_after_withdraw(
        &self,
        comet: Address,
        account: Address,
        asset: Address,
        withdraw_atomic: U256,
    ) -> Result<HealthRatio, EngineError> {
        let position = self.positions.position(comet, account).await?;
        let target = self
            .registry
            .fetch(self.positions.network(), &AssetId::from(asset))
            .await?;
        let amount = target.from_atomic_amount(withdraw_atomic)?;

        let projected = health_ratio_after_withdraw(&position, &target.asset_id, amount);
        debug!(
            market = %comet,
            account = %account,
            asset = %target.asset_id,
            amount = %amount,
            projected = %projected,
            "Projected health ratio after withdraw"
        );
        Ok(projected)
    }
}
