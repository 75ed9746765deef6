pub mod asset_registry;
pub mod capabilities;
pub mod ethereum_client;

pub use asset_registry::KnownAssetRegistry;
pub use capabilities::*;
pub use ethereum_client::{connect, EthereumClient};
