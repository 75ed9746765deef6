use serde::{Deserialize, Serialize};

use super::{nonzero_atomic, parse_positive_amount, ActionContext, ActionSuccess, BorrowAssetId};
use crate::error::ActionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowInput {
    pub asset_id: BorrowAssetId,
    pub amount: String,
}

/// Borrow from the market, refusing when the projected health ratio drops below 1.
pub async fn compound_borrow(
    ctx: &ActionContext,
    input: &BorrowInput,
) -> Result<ActionSuccess, ActionError> {
    let ticker = input.asset_id.ticker();
    let failure = |reason: String| {
        ActionError::external(format!(
            "Error borrowing {} {} from Compound: {}",
            input.amount, ticker, reason
        ))
    };

    let amount = parse_positive_amount(&input.amount)?;
    let asset = ctx.fetch_asset(input.asset_id.as_str()).await?;
    let atomic = nonzero_atomic(amount, asset.decimals, &ticker)?;

    let projected = ctx
        .health()
        .health_ratio_after_borrow(ctx.comet(), ctx.account, atomic)
        .await
        .map_err(|e| failure(e.to_string()))?;
    if !projected.is_healthy() {
        return Err(ActionError::unhealthy_position(format!(
            "Error: Borrowing {} {} would result in an unhealthy position. Health ratio would be {}",
            input.amount, ticker, projected
        )));
    }

    let outcome = ctx
        .comet_withdraw(&asset, atomic, |e| failure(e.to_string()))
        .await?;

    Ok(ActionSuccess::confirmed(
        format!("Borrowed {} {} from Compound V3.", input.amount, ticker),
        vec![outcome],
    ))
}
