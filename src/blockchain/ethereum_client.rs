use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    sol_types::SolCall,
    transports::http::{Client, Http},
};
use async_trait::async_trait;
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::capabilities::{
    ContractInvocation, ContractReader, ContractWriter, PendingInvocation, TransactionOutcome,
};
use crate::adapters::compound_v3::chains::chain_config;
use crate::adapters::compound_v3::contracts::{IComet, IERC20};
use crate::adapters::compound_v3::ChainConfig;
use crate::config::ConfirmationSettings;
use crate::error::ChainError;
use crate::models::{AssetInfo, Network};

/// alloy-backed reader and writer for one Base network and one signing account.
pub struct EthereumClient<P> {
    provider: P,
    account: Address,
    chain: &'static dyn ChainConfig,
    confirmation: ConfirmationSettings,
}

/// Build a signing HTTP provider and verify it is connected to `network`.
pub async fn connect(
    rpc_url: &str,
    private_key: &str,
    network: Network,
    confirmation: ConfirmationSettings,
) -> Result<EthereumClient<impl Provider<Http<Client>> + 'static>, ChainError> {
    let signer = PrivateKeySigner::from_str(private_key.trim())
        .map_err(|e| ChainError::SignerError(format!("Invalid private key: {}", e)))?;
    let account = signer.address();

    let url: url::Url = rpc_url
        .parse()
        .map_err(|e| ChainError::RpcError(format!("Invalid RPC URL: {}", e)))?;
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    let client = EthereumClient::new(provider, account, network, confirmation);
    client.test_connection().await?;
    Ok(client)
}

impl<P> EthereumClient<P>
where
    P: Provider<Http<Client>>,
{
    pub fn new(
        provider: P,
        account: Address,
        network: Network,
        confirmation: ConfirmationSettings,
    ) -> Self {
        Self {
            provider,
            account,
            chain: chain_config(network),
            confirmation,
        }
    }

    /// Check the RPC endpoint serves the chain this client was built for.
    pub async fn test_connection(&self) -> Result<(), ChainError> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| ChainError::RpcError(format!("Failed to connect to RPC: {}", e)))?;

        if chain_id != self.chain.chain_id() {
            return Err(ChainError::RpcError(format!(
                "RPC serves chain {} but {} is chain {}",
                chain_id,
                self.chain.chain_name(),
                self.chain.chain_id()
            )));
        }

        info!(
            chain = self.chain.chain_name(),
            chain_id,
            account = %self.account,
            "Base RPC connection established"
        );
        Ok(())
    }

    async fn read<C>(&self, contract: Address, call: C) -> Result<C::Return, ChainError>
    where
        C: SolCall + Send,
    {
        debug!(contract = %contract, method = C::SIGNATURE, "eth_call");
        let tx = TransactionRequest::default()
            .with_to(contract)
            .with_input(call.abi_encode());

        let output = self.provider.call(&tx).await.map_err(|e| {
            ChainError::ContractError(format!("{} on {} failed: {}", C::SIGNATURE, contract, e))
        })?;

        C::abi_decode_returns(&output, true).map_err(|e| {
            ChainError::DecodeError(format!("{} on {}: {}", C::SIGNATURE, contract, e))
        })
    }
}

#[async_trait]
impl<P> ContractReader for EthereumClient<P>
where
    P: Provider<Http<Client>> + Send + Sync,
{
    async fn borrow_balance_of(&self, comet: Address, account: Address) -> Result<U256, ChainError> {
        Ok(self
            .read(comet, IComet::borrowBalanceOfCall { account })
            .await?
            ._0)
    }

    async fn base_token(&self, comet: Address) -> Result<Address, ChainError> {
        Ok(self.read(comet, IComet::baseTokenCall {}).await?._0)
    }

    async fn base_token_price_feed(&self, comet: Address) -> Result<Address, ChainError> {
        Ok(self.read(comet, IComet::baseTokenPriceFeedCall {}).await?._0)
    }

    async fn get_price(&self, comet: Address, price_feed: Address) -> Result<U256, ChainError> {
        Ok(self
            .read(comet, IComet::getPriceCall { priceFeed: price_feed })
            .await?
            ._0)
    }

    async fn num_assets(&self, comet: Address) -> Result<u8, ChainError> {
        Ok(self.read(comet, IComet::numAssetsCall {}).await?._0)
    }

    async fn get_asset_info(&self, comet: Address, index: u8) -> Result<AssetInfo, ChainError> {
        let info = self.read(comet, IComet::getAssetInfoCall { i: index }).await?._0;
        Ok(AssetInfo::from(info))
    }

    async fn collateral_balance_of(
        &self,
        comet: Address,
        account: Address,
        asset: Address,
    ) -> Result<u128, ChainError> {
        Ok(self
            .read(comet, IComet::collateralBalanceOfCall { account, asset })
            .await?
            ._0)
    }

    async fn token_symbol(&self, token: Address) -> Result<String, ChainError> {
        Ok(self.read(token, IERC20::symbolCall {}).await?._0)
    }

    async fn token_balance_of(&self, token: Address, account: Address) -> Result<U256, ChainError> {
        Ok(self
            .read(token, IERC20::balanceOfCall { account })
            .await?
            ._0)
    }
}

#[async_trait]
impl<P> ContractWriter for EthereumClient<P>
where
    P: Provider<Http<Client>> + Send + Sync,
{
    fn address(&self) -> Address {
        self.account
    }

    async fn invoke(&self, invocation: ContractInvocation) -> Result<PendingInvocation, ChainError> {
        let mut tx = TransactionRequest::default()
            .with_from(self.account)
            .with_to(invocation.contract)
            .with_input(invocation.calldata.clone());
        if let Some(value) = invocation.value {
            tx = tx.with_value(value);
        }

        let pending = self.provider.send_transaction(tx).await.map_err(|e| {
            ChainError::ContractError(format!(
                "{} on {} failed: {}",
                invocation.method, invocation.contract, e
            ))
        })?;
        let tx_hash = *pending.tx_hash();

        info!(
            contract = %invocation.contract,
            method = invocation.method,
            tx_hash = %tx_hash,
            "Transaction submitted"
        );
        Ok(PendingInvocation {
            tx_hash,
            method: invocation.method,
        })
    }

    async fn wait(&self, pending: PendingInvocation) -> Result<TransactionOutcome, ChainError> {
        let max_polls = self.confirmation.max_polls;

        for attempt in 1..=max_polls {
            let receipt = self
                .provider
                .get_transaction_receipt(pending.tx_hash)
                .await
                .map_err(|e| {
                    ChainError::RpcError(format!("Failed to get receipt for {}: {}", pending.tx_hash, e))
                })?;

            match receipt {
                Some(receipt) if receipt.status() => {
                    info!(
                        method = pending.method,
                        tx_hash = %pending.tx_hash,
                        block = ?receipt.block_number,
                        "Transaction confirmed"
                    );
                    return Ok(TransactionOutcome {
                        transaction_hash: pending.tx_hash,
                        transaction_link: self.chain.transaction_link(&pending.tx_hash),
                    });
                }
                Some(_) => {
                    warn!(method = pending.method, tx_hash = %pending.tx_hash, "Transaction reverted");
                    return Err(ChainError::Reverted(pending.tx_hash.to_string()));
                }
                None => {
                    debug!(attempt, max_polls, tx_hash = %pending.tx_hash, "Receipt not available yet");
                    tokio::time::sleep(self.confirmation.poll_interval()).await;
                }
            }
        }

        Err(ChainError::ConfirmationTimeout {
            hash: pending.tx_hash.to_string(),
            polls: max_polls,
        })
    }
}
