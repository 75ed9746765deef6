// Compound V3 (Comet) on Base
pub mod chain_config;
pub mod chains;
pub mod contracts;

pub use chain_config::ChainConfig;
