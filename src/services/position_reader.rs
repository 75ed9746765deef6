use alloy::primitives::{Address, U256};
use futures::future::try_join_all;
use futures::try_join;
use tracing::{debug, warn};

use crate::blockchain::{AssetRegistry, ContractReader};
use crate::error::{EngineError, RegistryError};
use crate::models::{AssetId, AssetInfo, BorrowDetails, Market, Network, Position, SupplyDetail};
use crate::utils::math;

/// Reads a wallet's borrow and collateral legs from one Comet market and
/// normalizes them to human units.
#[derive(Clone, Copy)]
pub struct PositionReader<'a> {
    reader: &'a dyn ContractReader,
    registry: &'a dyn AssetRegistry,
    network: Network,
}

impl<'a> PositionReader<'a> {
    pub fn new(
        reader: &'a dyn ContractReader,
        registry: &'a dyn AssetRegistry,
        network: Network,
    ) -> Self {
        Self {
            reader,
            registry,
            network,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Base asset and the ordered collateral list of `comet`.
    pub async fn market(&self, comet: Address) -> Result<Market, EngineError> {
        let (base_token, base_token_price_feed, num_assets) = try_join!(
            self.reader.base_token(comet),
            self.reader.base_token_price_feed(comet),
            self.reader.num_assets(comet),
        )?;

        let collateral_assets =
            try_join_all((0..num_assets).map(|index| self.reader.get_asset_info(comet, index)))
                .await?;

        debug!(market = %comet, num_assets, "Loaded market configuration");
        Ok(Market {
            address: comet,
            network: self.network,
            base_token,
            base_token_price_feed,
            collateral_assets,
        })
    }

    pub async fn borrow_details(
        &self,
        comet: Address,
        account: Address,
    ) -> Result<BorrowDetails, EngineError> {
        let (raw_amount, base_token, price_feed) = try_join!(
            self.reader.borrow_balance_of(comet, account),
            self.reader.base_token(comet),
            self.reader.base_token_price_feed(comet),
        )?;

        let base_asset = self
            .registry
            .fetch(self.network, &AssetId::from(base_token))
            .await?;
        let raw_price = self.reader.get_price(comet, price_feed).await?;

        Ok(BorrowDetails {
            symbol: base_asset.asset_id.clone(),
            amount: base_asset.from_atomic_amount(raw_amount)?,
            price: math::normalize_price(raw_price)?,
        })
    }

    /// One entry per collateral asset the registry knows, in market order.
    pub async fn supply_details(
        &self,
        comet: Address,
        account: Address,
    ) -> Result<Vec<SupplyDetail>, EngineError> {
        let market = self.market(comet).await?;
        let details = try_join_all(
            market
                .collateral_assets
                .iter()
                .map(|info| self.supply_detail(comet, account, info)),
        )
        .await?;

        Ok(details.into_iter().flatten().collect())
    }

    async fn supply_detail(
        &self,
        comet: Address,
        account: Address,
        info: &AssetInfo,
    ) -> Result<Option<SupplyDetail>, EngineError> {
        let asset = match self.registry.fetch(self.network, &AssetId::from(info.asset)).await {
            Ok(asset) => asset,
            Err(RegistryError::NotFound(id)) => {
                warn!(
                    market = %comet,
                    asset = %info.asset,
                    id = %id,
                    "Skipping collateral asset missing from registry"
                );
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let (raw_balance, symbol, raw_price) = try_join!(
            self.reader.collateral_balance_of(comet, account, info.asset),
            self.reader.token_symbol(info.asset),
            self.reader.get_price(comet, info.price_feed),
        )?;

        Ok(Some(SupplyDetail {
            asset: info.asset,
            symbol,
            amount: asset.from_atomic_amount(U256::from(raw_balance))?,
            price: math::normalize_price(raw_price)?,
            collateral_factor: info.borrow_collateral_factor()?,
        }))
    }

    /// Borrow and supply legs, fetched concurrently.
    pub async fn position(&self, comet: Address, account: Address) -> Result<Position, EngineError> {
        let (borrow, supplies) = try_join!(
            self.borrow_details(comet, account),
            self.supply_details(comet, account),
        )?;
        debug!(
            market = %comet,
            account = %account,
            supplies = supplies.len(),
            "Fetched position"
        );
        Ok(Position { borrow, supplies })
    }

    /// Raw collateral balance of `asset` in atomic units.
    pub async fn collateral_balance(
        &self,
        comet: Address,
        account: Address,
        asset: Address,
    ) -> Result<U256, EngineError> {
        let raw = self
            .reader
            .collateral_balance_of(comet, account, asset)
            .await?;
        Ok(U256::from(raw))
    }
}
