// Chain-specific configuration trait and utilities for Compound V3
use alloy::primitives::{Address, TxHash};

use crate::models::Network;

/// Chain-specific configuration trait for Compound V3
pub trait ChainConfig: Send + Sync {
    fn network(&self) -> Network;
    fn chain_id(&self) -> u64;
    fn chain_name(&self) -> &'static str;
    /// The single Comet market the actions operate on.
    fn comet_address(&self) -> Address;
    fn weth_address(&self) -> Address;
    fn explorer_url(&self) -> &'static str;
    fn native_token_symbol(&self) -> &'static str;
    fn block_time_ms(&self) -> u64;

    fn transaction_link(&self, hash: &TxHash) -> String {
        format!("{}/tx/{}", self.explorer_url(), hash)
    }
}

/// Configuration validation utilities
pub mod validation {
    use super::*;

    pub fn validate_config(config: &dyn ChainConfig) -> Result<(), String> {
        if config.chain_id() == 0 {
            return Err("Chain ID cannot be zero".to_string());
        }

        if config.comet_address() == Address::ZERO {
            return Err("Comet address cannot be zero".to_string());
        }

        if config.weth_address() == Address::ZERO {
            return Err("WETH address cannot be zero".to_string());
        }

        if config.chain_name().is_empty() {
            return Err("Chain name cannot be empty".to_string());
        }

        if config.native_token_symbol().is_empty() {
            return Err("Native token symbol cannot be empty".to_string());
        }

        if !config.explorer_url().starts_with("https://") {
            return Err("Explorer URL must be https".to_string());
        }

        if config.block_time_ms() == 0 || config.block_time_ms() > 60000 {
            return Err("Block time must be between 1ms and 60s".to_string());
        }

        Ok(())
    }
}
