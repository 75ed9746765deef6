use serde::{Deserialize, Serialize};
use std::fmt;

/// Network id of Base mainnet. Every other id is treated as the testnet.
pub const BASE_MAINNET_ID: &str = "base-mainnet";

/// Network id of Base Sepolia.
pub const BASE_SEPOLIA_ID: &str = "base-sepolia";

/// The two deployments a wallet can be operating on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn from_network_id(network_id: &str) -> Self {
        if network_id == BASE_MAINNET_ID {
            Network::Mainnet
        } else {
            Network::Testnet
        }
    }

    pub fn network_id(self) -> &'static str {
        match self {
            Network::Mainnet => BASE_MAINNET_ID,
            Network::Testnet => BASE_SEPOLIA_ID,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.network_id())
    }
}
