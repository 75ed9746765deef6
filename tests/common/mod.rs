#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use alloy::primitives::{address, Address, TxHash, U256};
use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use base_compound_actions::actions::ActionContext;
use base_compound_actions::adapters::compound_v3::chains::chain_config;
use base_compound_actions::blockchain::{
    ContractInvocation, ContractReader, ContractWriter, KnownAssetRegistry, PendingInvocation,
    TransactionOutcome,
};
use base_compound_actions::models::{AssetInfo, Network};
use base_compound_actions::utils::math;
use base_compound_actions::ChainError;

pub const MAINNET_USDC: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
pub const SEPOLIA_USDC: Address = address!("036CbD53842c5426634e7929541eC2318f3dCF7e");
pub const WETH: Address = address!("4200000000000000000000000000000000000006");
pub const CBETH: Address = address!("2Ae3F1Ec7F1F5012CFEab0185bfc7aa3cf0DEc22");
pub const CBBTC: Address = address!("cbB7C0000aB88B473b1f5aFd9ef808440eed33Bf");
pub const WSTETH: Address = address!("c1CBa3fCea344f92D9239c08C0568f6F2F0ee452");
pub const SEPOLIA_CBETH: Address = address!("774eD9EDB0C5202dF9A86183804b5D9E99dC6CA3");
pub const UNKNOWN_TOKEN: Address = address!("00000000000000000000000000000000000dEaD1");

pub const ACCOUNT: Address = address!("742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6");

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// Human amount to atomic units.
pub fn units(amount: &str, decimals: u8) -> U256 {
    math::to_atomic(dec(amount), decimals).unwrap()
}

fn raw_price(usd: &str) -> U256 {
    units(usd, 8)
}

fn raw_factor(fraction: &str) -> u64 {
    (dec(fraction) * Decimal::from(1_000_000_000_000_000_000_u64))
        .to_u64()
        .unwrap()
}

#[derive(Default)]
struct ChainState {
    borrow_balance: U256,
    base_token: Address,
    base_price_feed: Address,
    prices: HashMap<Address, U256>,
    assets: Vec<AssetInfo>,
    collateral: HashMap<Address, u128>,
    symbols: HashMap<Address, String>,
    wallet: HashMap<Address, U256>,
    invocations: Vec<ContractInvocation>,
    failing_method: Option<(&'static str, ChainError)>,
    failing_reads: Option<ChainError>,
}

/// In-memory Comet market plus ERC-20 balances for a single account.
pub struct FakeChain {
    pub network: Network,
    pub account: Address,
    state: Mutex<ChainState>,
}

impl FakeChain {
    /// USDC base market at $1 with nothing supplied or borrowed.
    pub fn new(network: Network) -> Self {
        let base_token = match network {
            Network::Mainnet => MAINNET_USDC,
            Network::Testnet => SEPOLIA_USDC,
        };
        let base_price_feed = Address::repeat_byte(0xb0);

        let mut state = ChainState {
            base_token,
            base_price_feed,
            ..ChainState::default()
        };
        state.prices.insert(base_price_feed, raw_price("1"));
        state.symbols.insert(base_token, "USDC".to_string());

        Self {
            network,
            account: ACCOUNT,
            state: Mutex::new(state),
        }
    }

    pub fn mainnet() -> Self {
        Self::new(Network::Mainnet)
    }

    pub fn testnet() -> Self {
        Self::new(Network::Testnet)
    }

    /// Register a collateral asset and the account's supplied balance of it.
    pub fn with_collateral(
        self,
        asset: Address,
        symbol: &str,
        decimals: u8,
        price_usd: &str,
        collateral_factor: &str,
        supplied: &str,
    ) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let offset = state.assets.len() as u8;
            let price_feed = Address::repeat_byte(0xf0 + offset);
            state.assets.push(AssetInfo {
                offset,
                asset,
                price_feed,
                scale: 10u64.pow(u32::from(decimals)),
                borrow_collateral_factor: raw_factor(collateral_factor),
                liquidate_collateral_factor: raw_factor(collateral_factor),
                liquidation_factor: raw_factor("0.95"),
                supply_cap: u128::MAX,
            });
            state.prices.insert(price_feed, raw_price(price_usd));
            state.symbols.insert(asset, symbol.to_string());
            state
                .collateral
                .insert(asset, units(supplied, decimals).to::<u128>());
        }
        self
    }

    /// Outstanding borrow in whole base units.
    pub fn with_borrow(self, amount: &str) -> Self {
        self.state.lock().unwrap().borrow_balance = units(amount, 6);
        self
    }

    pub fn with_wallet_balance(self, token: Address, amount: &str, decimals: u8) -> Self {
        self.state
            .lock()
            .unwrap()
            .wallet
            .insert(token, units(amount, decimals));
        self
    }

    /// Make every invocation of `method` fail with `error`.
    pub fn failing_method(self, method: &'static str, error: ChainError) -> Self {
        self.state.lock().unwrap().failing_method = Some((method, error));
        self
    }

    /// Make every read fail with `error`.
    pub fn failing_reads(self, error: ChainError) -> Self {
        self.state.lock().unwrap().failing_reads = Some(error);
        self
    }

    pub fn invocations(&self) -> Vec<ContractInvocation> {
        self.state.lock().unwrap().invocations.clone()
    }

    pub fn comet(&self) -> Address {
        chain_config(self.network).comet_address()
    }

    fn read<T>(&self, f: impl FnOnce(&ChainState) -> Option<T>, what: &str) -> Result<T, ChainError> {
        let state = self.state.lock().unwrap();
        if let Some(error) = &state.failing_reads {
            return Err(error.clone());
        }
        f(&state).ok_or_else(|| ChainError::ContractError(format!("execution reverted: {}", what)))
    }

    fn check_comet(&self, comet: Address) -> Result<(), ChainError> {
        if comet == self.comet() {
            Ok(())
        } else {
            Err(ChainError::ContractError(format!("no contract at {}", comet)))
        }
    }
}

#[async_trait]
impl ContractReader for FakeChain {
    async fn borrow_balance_of(&self, comet: Address, account: Address) -> Result<U256, ChainError> {
        self.check_comet(comet)?;
        let own = account == self.account;
        self.read(|s| Some(if own { s.borrow_balance } else { U256::ZERO }), "borrowBalanceOf")
    }

    async fn base_token(&self, comet: Address) -> Result<Address, ChainError> {
        self.check_comet(comet)?;
        self.read(|s| Some(s.base_token), "baseToken")
    }

    async fn base_token_price_feed(&self, comet: Address) -> Result<Address, ChainError> {
        self.check_comet(comet)?;
        self.read(|s| Some(s.base_price_feed), "baseTokenPriceFeed")
    }

    async fn get_price(&self, comet: Address, price_feed: Address) -> Result<U256, ChainError> {
        self.check_comet(comet)?;
        self.read(|s| s.prices.get(&price_feed).copied(), "getPrice")
    }

    async fn num_assets(&self, comet: Address) -> Result<u8, ChainError> {
        self.check_comet(comet)?;
        self.read(|s| Some(s.assets.len() as u8), "numAssets")
    }

    async fn get_asset_info(&self, comet: Address, index: u8) -> Result<AssetInfo, ChainError> {
        self.check_comet(comet)?;
        self.read(|s| s.assets.get(usize::from(index)).cloned(), "getAssetInfo")
    }

    async fn collateral_balance_of(
        &self,
        comet: Address,
        account: Address,
        asset: Address,
    ) -> Result<u128, ChainError> {
        self.check_comet(comet)?;
        let own = account == self.account;
        self.read(
            |s| Some(if own { s.collateral.get(&asset).copied().unwrap_or(0) } else { 0 }),
            "collateralBalanceOf",
        )
    }

    async fn token_symbol(&self, token: Address) -> Result<String, ChainError> {
        self.read(|s| s.symbols.get(&token).cloned(), "symbol")
    }

    async fn token_balance_of(&self, token: Address, account: Address) -> Result<U256, ChainError> {
        let own = account == self.account;
        self.read(
            |s| Some(if own { s.wallet.get(&token).copied().unwrap_or_default() } else { U256::ZERO }),
            "balanceOf",
        )
    }
}

#[async_trait]
impl ContractWriter for FakeChain {
    fn address(&self) -> Address {
        self.account
    }

    async fn invoke(&self, invocation: ContractInvocation) -> Result<PendingInvocation, ChainError> {
        let mut state = self.state.lock().unwrap();
        let method = invocation.method;
        state.invocations.push(invocation);

        if let Some((failing, error)) = &state.failing_method {
            if *failing == method {
                return Err(error.clone());
            }
        }

        let nonce = state.invocations.len() as u8;
        Ok(PendingInvocation {
            tx_hash: TxHash::with_last_byte(nonce),
            method,
        })
    }

    async fn wait(&self, pending: PendingInvocation) -> Result<TransactionOutcome, ChainError> {
        Ok(TransactionOutcome {
            transaction_hash: pending.tx_hash,
            transaction_link: chain_config(self.network).transaction_link(&pending.tx_hash),
        })
    }
}

pub fn context(chain: &Arc<FakeChain>) -> ActionContext {
    ActionContext::new(
        chain.network,
        chain.clone(),
        chain.clone(),
        Arc::new(KnownAssetRegistry::new()),
    )
}

/// A mainnet account with 1 WETH at $2000 supplied (collateral factor 0.8).
pub fn weth_position(borrow_usdc: &str) -> FakeChain {
    FakeChain::mainnet()
        .with_collateral(WETH, "WETH", 18, "2000", "0.8", "1")
        .with_borrow(borrow_usdc)
}
