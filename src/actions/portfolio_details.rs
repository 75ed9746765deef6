use super::{ActionContext, ActionSuccess};
use crate::error::ActionError;
use crate::services::portfolio_details;

/// Markdown report of supplies, borrow and health for the acting account.
pub async fn get_portfolio_details(ctx: &ActionContext) -> Result<ActionSuccess, ActionError> {
    let positions = ctx.positions();
    let report = portfolio_details(&positions, ctx.registry.as_ref(), ctx.comet(), ctx.account)
        .await
        .map_err(|e| {
            ActionError::external(format!(
                "Error retrieving portfolio details from Compound: {}",
                e
            ))
        })?;

    Ok(ActionSuccess::message(report.to_string()))
}
