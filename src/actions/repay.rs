use serde::{Deserialize, Serialize};

use super::{nonzero_atomic, parse_positive_amount, ActionContext, ActionSuccess, BorrowAssetId};
use crate::error::ActionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepayInput {
    pub asset_id: BorrowAssetId,
    pub amount: String,
}

/// Repay borrowed base asset. On Comet a repayment is a `supply` of the base asset.
pub async fn compound_repay(
    ctx: &ActionContext,
    input: &RepayInput,
) -> Result<ActionSuccess, ActionError> {
    let ticker = input.asset_id.ticker();
    let amount = parse_positive_amount(&input.amount)?;
    let asset = ctx.fetch_asset(input.asset_id.as_str()).await?;
    let atomic = nonzero_atomic(amount, asset.decimals, &ticker)?;

    let balance = ctx.wallet_balance(&asset).await?;
    if balance < amount {
        return Err(ActionError::insufficient_balance(format!(
            "Error: Insufficient balance. You have {} {}, but trying to repay {} {}",
            balance, ticker, input.amount, ticker
        )));
    }

    let transactions = ctx
        .approve_and_supply(&asset, atomic, |e| {
            ActionError::external(format!(
                "Error repaying {} {} to Compound: {}",
                input.amount, ticker, e
            ))
        })
        .await?;

    Ok(ActionSuccess::confirmed(
        format!("Repaid {} {} to Compound V3.", input.amount, ticker),
        transactions,
    ))
}
