use serde::{Deserialize, Serialize};

use super::{nonzero_atomic, parse_positive_amount, ActionContext, ActionSuccess, SupplyAssetId};
use crate::error::ActionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyInput {
    pub asset_id: SupplyAssetId,
    /// Whole units, e.g. `0.125` WETH or `19.99` USDC.
    pub amount: String,
}

/// Supply collateral (or base asset) from the wallet to the market.
pub async fn compound_supply(
    ctx: &ActionContext,
    input: &SupplyInput,
) -> Result<ActionSuccess, ActionError> {
    let ticker = input.asset_id.ticker();
    let amount = parse_positive_amount(&input.amount)?;
    let asset = ctx.fetch_asset(input.asset_id.as_str()).await?;
    let atomic = nonzero_atomic(amount, asset.decimals, &ticker)?;

    let balance = ctx.wallet_balance(&asset).await?;
    if balance < amount {
        return Err(ActionError::insufficient_balance(format!(
            "Error: Insufficient balance. You have {} {}, but trying to supply {} {}",
            balance, ticker, input.amount, ticker
        )));
    }

    let transactions = ctx
        .approve_and_supply(&asset, atomic, |e| {
            ActionError::external(format!(
                "Error supplying {} {} to Compound: {}",
                input.amount, ticker, e
            ))
        })
        .await?;

    Ok(ActionSuccess::confirmed(
        format!("Supplied {} {} to Compound V3.", input.amount, ticker),
        transactions,
    ))
}
