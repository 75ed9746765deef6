use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{nonzero_atomic, ActionContext, ActionSuccess};
use crate::adapters::compound_v3::contracts::IWETH;
use crate::blockchain::ContractInvocation;
use crate::error::ActionError;

const WEI_DECIMALS: u8 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapEthInput {
    /// Whole ETH, e.g. `1.5`.
    pub amount_to_wrap: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnwrapWethInput {
    /// Whole WETH, e.g. `1.5`.
    pub amount_to_unwrap: Decimal,
}

fn positive(field: &str, amount: Decimal) -> Result<Decimal, ActionError> {
    if amount <= Decimal::ZERO {
        return Err(ActionError::validation(format!(
            "{} must be greater than 0",
            field
        )));
    }
    Ok(amount)
}

/// Wrap native ETH by sending it to `WETH.deposit()`.
pub async fn wrap_eth(ctx: &ActionContext, input: &WrapEthInput) -> Result<ActionSuccess, ActionError> {
    let amount = positive("amount_to_wrap", input.amount_to_wrap)?;
    let wei = nonzero_atomic(amount, WEI_DECIMALS, "ETH")?;

    let invocation =
        ContractInvocation::new(ctx.chain().weth_address(), &IWETH::depositCall {}).with_value(wei);
    let outcome = ctx
        .writer
        .invoke_and_wait(invocation)
        .await
        .map_err(|e| ActionError::external(format!("Unexpected error wrapping ETH: {}", e)))?;

    Ok(ActionSuccess {
        message: format!(
            "Wrapped {} ETH with transaction hash: {}",
            amount, outcome.transaction_hash
        ),
        transactions: vec![outcome],
    })
}

/// Unwrap WETH back to native ETH via `WETH.withdraw(wad)`.
pub async fn unwrap_weth(
    ctx: &ActionContext,
    input: &UnwrapWethInput,
) -> Result<ActionSuccess, ActionError> {
    let amount = positive("amount_to_unwrap", input.amount_to_unwrap)?;
    let wad = nonzero_atomic(amount, WEI_DECIMALS, "WETH")?;

    let invocation = ContractInvocation::new(ctx.chain().weth_address(), &IWETH::withdrawCall { wad });
    let outcome = ctx
        .writer
        .invoke_and_wait(invocation)
        .await
        .map_err(|e| ActionError::external(format!("Unexpected error unwrapping WETH: {}", e)))?;

    Ok(ActionSuccess {
        message: format!(
            "Unwrapped {} WETH with transaction hash: {}",
            amount, outcome.transaction_hash
        ),
        transactions: vec![outcome],
    })
}
