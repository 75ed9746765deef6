// Chain registry for the Compound V3 adapter
pub mod base;

use crate::adapters::compound_v3::chain_config::ChainConfig;
use crate::models::Network;
use base::{BaseMainnetConfig, BaseSepoliaConfig};

static BASE_MAINNET: BaseMainnetConfig = BaseMainnetConfig;
static BASE_SEPOLIA: BaseSepoliaConfig = BaseSepoliaConfig;

/// Get the chain configuration for a network
pub fn chain_config(network: Network) -> &'static dyn ChainConfig {
    match network {
        Network::Mainnet => &BASE_MAINNET,
        Network::Testnet => &BASE_SEPOLIA,
    }
}
