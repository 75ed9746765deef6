use alloy::primitives::{address, Address};
use async_trait::async_trait;
use std::collections::HashMap;

use super::capabilities::AssetRegistry;
use crate::adapters::compound_v3::chains::base::WETH_ADDRESS;
use crate::error::RegistryError;
use crate::models::{Asset, AssetId, Network};

const MAINNET_USDC: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
const MAINNET_CBETH: Address = address!("2Ae3F1Ec7F1F5012CFEab0185bfc7aa3cf0DEc22");
const MAINNET_CBBTC: Address = address!("cbB7C0000aB88B473b1f5aFd9ef808440eed33Bf");
const MAINNET_WSTETH: Address = address!("c1CBa3fCea344f92D9239c08C0568f6F2F0ee452");
const SEPOLIA_USDC: Address = address!("036CbD53842c5426634e7929541eC2318f3dCF7e");

/// Fixed table of the ERC-20 assets the Base Comet markets use.
///
/// Base Sepolia only lists USDC and WETH, so its other collateral resolves
/// to `NotFound`.
#[derive(Debug, Clone)]
pub struct KnownAssetRegistry {
    assets: HashMap<Network, Vec<Asset>>,
}

impl KnownAssetRegistry {
    pub fn new() -> Self {
        let mut assets = HashMap::new();
        assets.insert(
            Network::Mainnet,
            vec![
                Asset::new("usdc", 6, MAINNET_USDC),
                Asset::new("weth", 18, WETH_ADDRESS),
                Asset::new("cbeth", 18, MAINNET_CBETH),
                Asset::new("cbbtc", 8, MAINNET_CBBTC),
                Asset::new("wsteth", 18, MAINNET_WSTETH),
            ],
        );
        assets.insert(
            Network::Testnet,
            vec![
                Asset::new("usdc", 6, SEPOLIA_USDC),
                Asset::new("weth", 18, WETH_ADDRESS),
            ],
        );
        Self { assets }
    }

    pub fn lookup(&self, network: Network, id: &AssetId) -> Option<&Asset> {
        self.assets
            .get(&network)
            .and_then(|assets| assets.iter().find(|asset| asset.matches(id)))
    }
}

impl Default for KnownAssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetRegistry for KnownAssetRegistry {
    async fn fetch(&self, network: Network, id: &AssetId) -> Result<Asset, RegistryError> {
        self.lookup(network, id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }
}
