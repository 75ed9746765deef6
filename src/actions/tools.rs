//! Tool descriptions handed to an agent framework.

use serde::Serialize;
use serde_json::{json, Value};

use super::{BorrowAssetId, SupplyAssetId};

const COMPOUND_SUPPLY_PROMPT: &str = "
This tool supplies assets to the Compound V3 USDC market on Base.
It takes the following inputs:
- asset_id: The asset to supply, one of `weth`, `cbeth`, `cbbtc`, `wsteth` or `usdc`
- amount: The amount to supply in whole units
    Examples for WETH:
    - 1 WETH
    - 0.1 WETH
    - 0.01 WETH
Important notes:
- Ensure you have sufficient balance of the asset you want to supply
- Keep some ETH in the wallet for gas fees
";

const COMPOUND_BORROW_PROMPT: &str = "
This tool borrows WETH or USDC from the Compound V3 market on Base.
It takes the following inputs:
- asset_id: The asset to borrow, either `weth` or `usdc`
- amount: The amount to borrow in whole units
    Examples for WETH:
    - 1 WETH
    - 0.1 WETH
    - 0.01 WETH
Important notes:
- Ensure you have sufficient collateral to borrow against
- The borrow is refused if it would leave the health ratio below 1
- Keep some ETH in the wallet for gas fees
";

const COMPOUND_REPAY_PROMPT: &str = "
This tool repays borrowed WETH or USDC to the Compound V3 market on Base.
It takes the following inputs:
- asset_id: The asset to repay, either `weth` or `usdc`
- amount: The amount to repay in whole units
    Examples for WETH:
    - 1 WETH
    - 0.1 WETH
    - 0.01 WETH
Important notes:
- Ensure you have sufficient balance of the asset you want to repay
- Keep some ETH in the wallet for gas fees
";

const COMPOUND_WITHDRAW_PROMPT: &str = "
This tool withdraws supplied assets from the Compound V3 market on Base.
It takes the following inputs:
- asset_id: The asset to withdraw, one of `weth`, `cbeth`, `cbbtc`, `wsteth` or `usdc`
- amount: The amount to withdraw in whole units
    Examples for WETH:
    - 1 WETH
    - 0.1 WETH
    - 0.01 WETH
Important notes:
- Ensure you have sufficient supplied balance of the asset you want to withdraw
- The withdrawal is refused if it would leave the health ratio below 1
- Keep some ETH in the wallet for gas fees
";

const PORTFOLIO_DETAILS_PROMPT: &str = "Fetches supply, borrow, and overall health details of your \
Compound position, formatted in Markdown for ease of readability.";

const WRAP_ETH_PROMPT: &str = "
This tool can only be used to wrap ETH to WETH.
Do not use this tool for any other purpose, or trading other assets.
Inputs:
- Amount of ETH to wrap.
Important notes:
- The amount should be specified in whole amounts of ETH (e.g., 0.01 for 0.01 ETH)
- Minimum amount is 0.0000001 ETH
- Only supported on Base Sepolia ('base-sepolia') and Base Mainnet ('base-mainnet')
";

const UNWRAP_WETH_PROMPT: &str = "
This tool can only be used to unwrap WETH to ETH.
Do not use this tool for any other purpose.
Inputs:
- Amount of WETH to unwrap
Important notes:
- The amount should be specified in whole amounts of WETH (e.g., 0.01 for 0.01 WETH)
- Minimum amount is 0.0000001 WETH
- Only supported on Base Sepolia ('base-sepolia') and Base Mainnet ('base-mainnet')
";

/// Name, prompt and JSON-schema parameters of one action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

fn asset_amount_schema(verb: &str, asset_ids: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": {
            "asset_id": {
                "type": "string",
                "enum": asset_ids,
                "description": format!("The asset ID to {}, one of {}", verb, asset_ids.join(", ")),
            },
            "amount": {
                "type": "string",
                "description": format!(
                    "The amount of the asset to {}, e.g. 0.125 weth; 19.99 usdc",
                    verb
                ),
            }
        },
        "required": ["asset_id", "amount"]
    })
}

fn positive_number_schema(field: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            field: {
                "type": "number",
                "exclusiveMinimum": 0,
                "description": description,
            }
        },
        "required": [field]
    })
}

/// All actions, in dispatch order.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let supply_ids: Vec<&str> = SupplyAssetId::ALL.iter().map(|id| id.as_str()).collect();
    let borrow_ids: Vec<&str> = BorrowAssetId::ALL.iter().map(|id| id.as_str()).collect();

    vec![
        ToolDefinition {
            name: "compound_supply",
            description: COMPOUND_SUPPLY_PROMPT,
            parameters: asset_amount_schema("supply to the Compound market", &supply_ids),
        },
        ToolDefinition {
            name: "compound_borrow",
            description: COMPOUND_BORROW_PROMPT,
            parameters: asset_amount_schema("borrow from the Compound market", &borrow_ids),
        },
        ToolDefinition {
            name: "compound_repay",
            description: COMPOUND_REPAY_PROMPT,
            parameters: asset_amount_schema("repay to the Compound market", &borrow_ids),
        },
        ToolDefinition {
            name: "compound_withdraw",
            description: COMPOUND_WITHDRAW_PROMPT,
            parameters: asset_amount_schema("withdraw from the Compound market", &supply_ids),
        },
        ToolDefinition {
            name: "get_portfolio_details",
            description: PORTFOLIO_DETAILS_PROMPT,
            parameters: json!({ "type": "object", "properties": {} }),
        },
        ToolDefinition {
            name: "wrap_eth",
            description: WRAP_ETH_PROMPT,
            parameters: positive_number_schema(
                "amount_to_wrap",
                "Amount of ETH to wrap as whole amounts (e.g., 1.5 for 1.5 ETH)",
            ),
        },
        ToolDefinition {
            name: "unwrap_weth",
            description: UNWRAP_WETH_PROMPT,
            parameters: positive_number_schema(
                "amount_to_unwrap",
                "Amount of WETH to unwrap as whole amounts (e.g., 1.5 for 1.5 WETH)",
            ),
        },
    ]
}
