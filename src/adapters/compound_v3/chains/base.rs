// Base Compound V3 configuration
use crate::adapters::compound_v3::chain_config::ChainConfig;
use crate::models::Network;
use alloy::primitives::{address, Address};

/// Canonical WETH predeploy, identical on every OP-stack chain.
pub const WETH_ADDRESS: Address = address!("4200000000000000000000000000000000000006");

pub struct BaseMainnetConfig;

impl ChainConfig for BaseMainnetConfig {
    fn network(&self) -> Network {
        Network::Mainnet
    }

    fn chain_id(&self) -> u64 {
        8453
    }

    fn chain_name(&self) -> &'static str {
        "Base"
    }

    // cUSDCv3
    fn comet_address(&self) -> Address {
        address!("b125E6687d4313864e53df431d5425969c15Eb2F")
    }

    fn weth_address(&self) -> Address {
        WETH_ADDRESS
    }

    fn explorer_url(&self) -> &'static str {
        "https://basescan.org"
    }

    fn native_token_symbol(&self) -> &'static str {
        "ETH"
    }

    fn block_time_ms(&self) -> u64 {
        2000 // 2 seconds
    }
}

pub struct BaseSepoliaConfig;

impl ChainConfig for BaseSepoliaConfig {
    fn network(&self) -> Network {
        Network::Testnet
    }

    fn chain_id(&self) -> u64 {
        84532
    }

    fn chain_name(&self) -> &'static str {
        "Base Sepolia"
    }

    fn comet_address(&self) -> Address {
        address!("571621Ce60Cebb0c1D442B5afb38B1663C6Bf017")
    }

    fn weth_address(&self) -> Address {
        WETH_ADDRESS
    }

    fn explorer_url(&self) -> &'static str {
        "https://sepolia.basescan.org"
    }

    fn native_token_symbol(&self) -> &'static str {
        "ETH"
    }

    fn block_time_ms(&self) -> u64 {
        2000
    }
}
