//! External collaborators the position reader and the actions depend on.
//!
//! The alloy-backed [`EthereumClient`](super::EthereumClient) implements the
//! reader and writer; tests substitute an in-memory chain.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ChainError, RegistryError};
use crate::models::{Asset, AssetId, AssetInfo, Network};

/// Typed view calls against Comet and ERC-20 contracts.
#[async_trait]
pub trait ContractReader: Send + Sync {
    async fn borrow_balance_of(&self, comet: Address, account: Address) -> Result<U256, ChainError>;

    async fn base_token(&self, comet: Address) -> Result<Address, ChainError>;

    async fn base_token_price_feed(&self, comet: Address) -> Result<Address, ChainError>;

    /// Raw price with 8 decimals.
    async fn get_price(&self, comet: Address, price_feed: Address) -> Result<U256, ChainError>;

    async fn num_assets(&self, comet: Address) -> Result<u8, ChainError>;

    async fn get_asset_info(&self, comet: Address, index: u8) -> Result<AssetInfo, ChainError>;

    async fn collateral_balance_of(
        &self,
        comet: Address,
        account: Address,
        asset: Address,
    ) -> Result<u128, ChainError>;

    async fn token_symbol(&self, token: Address) -> Result<String, ChainError>;

    async fn token_balance_of(&self, token: Address, account: Address) -> Result<U256, ChainError>;
}

/// A state-changing contract call, ABI-encoded and ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInvocation {
    pub contract: Address,
    /// Solidity signature, e.g. `supply(address,uint256)`.
    pub method: &'static str,
    pub calldata: Bytes,
    /// Native value in wei attached to the call.
    pub value: Option<U256>,
}

impl ContractInvocation {
    pub fn new<C: SolCall>(contract: Address, call: &C) -> Self {
        Self {
            contract,
            method: C::SIGNATURE,
            calldata: Bytes::from(call.abi_encode()),
            value: None,
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }
}

/// Handle to a submitted transaction awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingInvocation {
    pub tx_hash: TxHash,
    pub method: &'static str,
}

/// A confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionOutcome {
    pub transaction_hash: TxHash,
    pub transaction_link: String,
}

/// Signs, submits and confirms transactions from a single account.
#[async_trait]
pub trait ContractWriter: Send + Sync {
    /// The account transactions are sent from.
    fn address(&self) -> Address;

    async fn invoke(&self, invocation: ContractInvocation) -> Result<PendingInvocation, ChainError>;

    /// Blocks until the transaction is mined. A reverted receipt is an error.
    async fn wait(&self, pending: PendingInvocation) -> Result<TransactionOutcome, ChainError>;

    async fn invoke_and_wait(
        &self,
        invocation: ContractInvocation,
    ) -> Result<TransactionOutcome, ChainError> {
        let pending = self.invoke(invocation).await?;
        self.wait(pending).await
    }
}

/// Asset metadata lookup by registry id or contract address.
#[async_trait]
pub trait AssetRegistry: Send + Sync {
    async fn fetch(&self, network: Network, id: &AssetId) -> Result<Asset, RegistryError>;
}
