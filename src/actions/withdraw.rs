use serde::{Deserialize, Serialize};

use super::{nonzero_atomic, parse_positive_amount, ActionContext, ActionSuccess, SupplyAssetId};
use crate::error::ActionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawInput {
    pub asset_id: SupplyAssetId,
    pub amount: String,
}

/// Withdraw supplied collateral. Checks the supplied balance first, then the
/// projected health ratio.
pub async fn compound_withdraw(
    ctx: &ActionContext,
    input: &WithdrawInput,
) -> Result<ActionSuccess, ActionError> {
    let ticker = input.asset_id.ticker();
    let failure = |reason: String| {
        ActionError::external(format!(
            "Error withdrawing {} {} from Compound: {}",
            input.amount, ticker, reason
        ))
    };

    let amount = parse_positive_amount(&input.amount)?;
    let asset = ctx.fetch_asset(input.asset_id.as_str()).await?;
    let atomic = nonzero_atomic(amount, asset.decimals, &ticker)?;

    let comet = ctx.comet();
    let collateral = ctx
        .positions()
        .collateral_balance(comet, ctx.account, asset.contract_address)
        .await
        .map_err(|e| failure(e.to_string()))?;
    if atomic > collateral {
        let supplied = asset
            .from_atomic_amount(collateral)
            .map_err(|e| failure(e.to_string()))?;
        return Err(ActionError::insufficient_balance(format!(
            "Error: Insufficient balance. Trying to withdraw {} {}, but only have {} {} supplied",
            input.amount, ticker, supplied, ticker
        )));
    }

    let projected = ctx
        .health()
        .health_ratio_after_withdraw(comet, ctx.account, asset.contract_address, atomic)
        .await
        .map_err(|e| failure(e.to_string()))?;
    if !projected.is_healthy() {
        return Err(ActionError::unhealthy_position(format!(
            "Error: Withdrawing {} {} would result in an unhealthy position. Health ratio would be {}",
            input.amount, ticker, projected
        )));
    }

    let outcome = ctx
        .comet_withdraw(&asset, atomic, |e| failure(e.to_string()))
        .await?;

    Ok(ActionSuccess::confirmed(
        format!("Withdrew {} {} from Compound V3.", input.amount, ticker),
        vec![outcome],
    ))
}
