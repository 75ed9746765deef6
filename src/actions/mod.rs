//! Agent-callable actions over the Base Comet market and WETH.
//!
//! Every action returns [`ActionSuccess`] or an [`ActionError`] whose message
//! is the text handed back to the agent.

pub mod borrow;
pub mod portfolio_details;
pub mod repay;
pub mod supply;
pub mod tools;
pub mod weth;
pub mod withdraw;

use alloy::primitives::{Address, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::adapters::compound_v3::chains::chain_config;
use crate::adapters::compound_v3::contracts::IComet;
use crate::adapters::compound_v3::ChainConfig;
use crate::blockchain::{
    AssetRegistry, ContractInvocation, ContractReader, ContractWriter, TransactionOutcome,
};
use crate::error::{ActionError, ChainError, RegistryError};
use crate::models::{Asset, AssetId, Network};
use crate::services::{approve, HealthRatioEngine, PositionReader};
use crate::utils::math;

pub use borrow::BorrowInput;
pub use repay::RepayInput;
pub use supply::SupplyInput;
pub use weth::{UnwrapWethInput, WrapEthInput};
pub use withdraw::WithdrawInput;

/// Everything an action needs: the network, the acting account and the
/// chain capabilities.
#[derive(Clone)]
pub struct ActionContext {
    pub network: Network,
    pub account: Address,
    pub reader: Arc<dyn ContractReader>,
    pub writer: Arc<dyn ContractWriter>,
    pub registry: Arc<dyn AssetRegistry>,
}

impl ActionContext {
    /// The acting account is the writer's address.
    pub fn new(
        network: Network,
        reader: Arc<dyn ContractReader>,
        writer: Arc<dyn ContractWriter>,
        registry: Arc<dyn AssetRegistry>,
    ) -> Self {
        Self {
            network,
            account: writer.address(),
            reader,
            writer,
            registry,
        }
    }

    pub fn chain(&self) -> &'static dyn ChainConfig {
        chain_config(self.network)
    }

    pub fn comet(&self) -> Address {
        self.chain().comet_address()
    }

    pub fn positions(&self) -> PositionReader<'_> {
        PositionReader::new(self.reader.as_ref(), self.registry.as_ref(), self.network)
    }

    pub fn health(&self) -> HealthRatioEngine<'_> {
        HealthRatioEngine::new(self.positions(), self.registry.as_ref())
    }

    async fn fetch_asset(&self, asset_id: &str) -> Result<Asset, ActionError> {
        self.registry
            .fetch(self.network, &AssetId::symbol(asset_id))
            .await
            .map_err(|e| match e {
                RegistryError::NotFound(_) => ActionError::validation(e),
                RegistryError::Unavailable(_) => ActionError::external(format!("Error: {}", e)),
            })
    }

    /// Wallet balance of `asset` in human units.
    async fn wallet_balance(&self, asset: &Asset) -> Result<Decimal, ActionError> {
        let raw = self
            .reader
            .token_balance_of(asset.contract_address, self.account)
            .await
            .map_err(|e| ActionError::external(format!("Error: {}", e)))?;
        asset.from_atomic_amount(raw).map_err(ActionError::validation)
    }

    /// Approve the market for exactly `atomic`, then call `Comet.supply`.
    async fn approve_and_supply(
        &self,
        asset: &Asset,
        atomic: U256,
        on_failure: impl FnOnce(ChainError) -> ActionError,
    ) -> Result<Vec<TransactionOutcome>, ActionError> {
        let comet = self.comet();
        let approval = approve(self.writer.as_ref(), asset.contract_address, comet, atomic)
            .await
            .map_err(|e| {
                warn!(asset = %asset.asset_id, error = %e, "Approval failed");
                ActionError::approval_failed(e)
            })?;

        let call = IComet::supplyCall {
            asset: asset.contract_address,
            amount: atomic,
        };
        let outcome = self
            .writer
            .invoke_and_wait(ContractInvocation::new(comet, &call))
            .await
            .map_err(on_failure)?;
        Ok(vec![approval, outcome])
    }

    /// `Comet.withdraw`, which borrows once the supplied base balance is exhausted.
    async fn comet_withdraw(
        &self,
        asset: &Asset,
        atomic: U256,
        on_failure: impl FnOnce(ChainError) -> ActionError,
    ) -> Result<TransactionOutcome, ActionError> {
        let call = IComet::withdrawCall {
            asset: asset.contract_address,
            amount: atomic,
        };
        self.writer
            .invoke_and_wait(ContractInvocation::new(self.comet(), &call))
            .await
            .map_err(on_failure)
    }
}

/// A completed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSuccess {
    pub message: String,
    /// Transactions sent, in order. Empty for read-only actions.
    pub transactions: Vec<TransactionOutcome>,
}

impl ActionSuccess {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            transactions: Vec::new(),
        }
    }

    /// `summary` followed by the hash and explorer link of the last transaction.
    fn confirmed(summary: String, transactions: Vec<TransactionOutcome>) -> Self {
        let message = match transactions.last() {
            Some(outcome) => format!(
                "{}\nTransaction hash: {}\nTransaction link: {}",
                summary, outcome.transaction_hash, outcome.transaction_link
            ),
            None => summary,
        };
        Self {
            message,
            transactions,
        }
    }
}

impl fmt::Display for ActionSuccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Assets accepted for supply and withdraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyAssetId {
    Weth,
    Cbeth,
    Cbbtc,
    Wsteth,
    Usdc,
}

impl SupplyAssetId {
    pub const ALL: [SupplyAssetId; 5] = [
        SupplyAssetId::Weth,
        SupplyAssetId::Cbeth,
        SupplyAssetId::Cbbtc,
        SupplyAssetId::Wsteth,
        SupplyAssetId::Usdc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SupplyAssetId::Weth => "weth",
            SupplyAssetId::Cbeth => "cbeth",
            SupplyAssetId::Cbbtc => "cbbtc",
            SupplyAssetId::Wsteth => "wsteth",
            SupplyAssetId::Usdc => "usdc",
        }
    }

    pub fn ticker(self) -> String {
        self.as_str().to_uppercase()
    }
}

/// Assets accepted for borrow and repay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorrowAssetId {
    Weth,
    Usdc,
}

impl BorrowAssetId {
    pub const ALL: [BorrowAssetId; 2] = [BorrowAssetId::Weth, BorrowAssetId::Usdc];

    pub fn as_str(self) -> &'static str {
        match self {
            BorrowAssetId::Weth => "weth",
            BorrowAssetId::Usdc => "usdc",
        }
    }

    pub fn ticker(self) -> String {
        self.as_str().to_uppercase()
    }
}

/// Parse a decimal amount string that must be strictly positive.
fn parse_positive_amount(amount: &str) -> Result<Decimal, ActionError> {
    let value = math::parse_amount(amount).map_err(ActionError::validation)?;
    if value <= Decimal::ZERO {
        return Err(ActionError::validation(format!(
            "amount must be greater than zero, got '{}'",
            amount
        )));
    }
    Ok(value)
}

/// Whole units to atomic units, rejecting amounts that truncate to zero.
fn nonzero_atomic(amount: Decimal, decimals: u8, ticker: &str) -> Result<U256, ActionError> {
    let atomic = math::to_atomic(amount, decimals).map_err(ActionError::validation)?;
    if atomic.is_zero() {
        return Err(ActionError::validation(format!(
            "amount {} is below the smallest unit of {}",
            amount, ticker
        )));
    }
    Ok(atomic)
}

/// An action call as produced by an agent's tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    CompoundSupply(SupplyInput),
    CompoundBorrow(BorrowInput),
    CompoundRepay(RepayInput),
    CompoundWithdraw(WithdrawInput),
    GetPortfolioDetails,
    WrapEth(WrapEthInput),
    UnwrapWeth(UnwrapWethInput),
}

impl Action {
    pub const NAMES: [&'static str; 7] = [
        "compound_supply",
        "compound_borrow",
        "compound_repay",
        "compound_withdraw",
        "get_portfolio_details",
        "wrap_eth",
        "unwrap_weth",
    ];

    /// Build an action from a tool name and its JSON arguments.
    pub fn from_call(name: &str, args: Value) -> Result<Self, ActionError> {
        if !Self::NAMES.contains(&name) {
            return Err(ActionError::validation(format!("unknown action '{}'", name)));
        }

        let mut object = match args {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(ActionError::validation(format!(
                    "arguments for {} must be a JSON object, got {}",
                    name, other
                )))
            }
        };
        object.insert("action".to_string(), Value::String(name.to_string()));

        serde_json::from_value(Value::Object(object)).map_err(|e| {
            ActionError::validation(format!("invalid arguments for {}: {}", name, e))
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::CompoundSupply(_) => "compound_supply",
            Action::CompoundBorrow(_) => "compound_borrow",
            Action::CompoundRepay(_) => "compound_repay",
            Action::CompoundWithdraw(_) => "compound_withdraw",
            Action::GetPortfolioDetails => "get_portfolio_details",
            Action::WrapEth(_) => "wrap_eth",
            Action::UnwrapWeth(_) => "unwrap_weth",
        }
    }

    pub async fn run(&self, ctx: &ActionContext) -> Result<ActionSuccess, ActionError> {
        info!(
            action = self.name(),
            network = %ctx.network,
            account = %ctx.account,
            "Running action"
        );

        let result = match self {
            Action::CompoundSupply(input) => supply::compound_supply(ctx, input).await,
            Action::CompoundBorrow(input) => borrow::compound_borrow(ctx, input).await,
            Action::CompoundRepay(input) => repay::compound_repay(ctx, input).await,
            Action::CompoundWithdraw(input) => withdraw::compound_withdraw(ctx, input).await,
            Action::GetPortfolioDetails => portfolio_details::get_portfolio_details(ctx).await,
            Action::WrapEth(input) => weth::wrap_eth(ctx, input).await,
            Action::UnwrapWeth(input) => weth::unwrap_weth(ctx, input).await,
        };

        if let Err(e) = &result {
            warn!(action = self.name(), kind = ?e.kind(), "Action failed");
        }
        result
    }
}
