use alloy::primitives::{Address, U256};
use tracing::info;

use crate::adapters::compound_v3::contracts::IERC20;
use crate::blockchain::{ContractInvocation, ContractWriter, TransactionOutcome};
use crate::error::ChainError;

/// Grant `spender` an ERC-20 allowance of exactly `amount` and wait for it to land.
pub async fn approve(
    writer: &dyn ContractWriter,
    token: Address,
    spender: Address,
    amount: U256,
) -> Result<TransactionOutcome, ChainError> {
    let call = IERC20::approveCall { spender, amount };
    let outcome = writer
        .invoke_and_wait(ContractInvocation::new(token, &call))
        .await?;

    info!(
        token = %token,
        spender = %spender,
        amount = %amount,
        tx_hash = %outcome.transaction_hash,
        "Allowance granted"
    );
    Ok(outcome)
}
