use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::SettingsError;
use crate::models::{Network, BASE_SEPOLIA_ID};

/// Prefix of every environment override, e.g. `COMPOUND__NETWORK__RPC_URL`.
pub const ENV_PREFIX: &str = "COMPOUND";

/// Default config file stem, resolved as `compound-actions.toml` and friends.
pub const DEFAULT_CONFIG_FILE: &str = "compound-actions";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub network: NetworkSettings,
    pub confirmation: ConfirmationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// `base-mainnet` selects mainnet; anything else is the testnet.
    pub id: String,
    pub rpc_url: String,
    #[serde(skip_serializing)]
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationSettings {
    pub poll_interval_ms: u64,
    pub max_polls: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        NetworkSettings {
            id: BASE_SEPOLIA_ID.to_string(),
            rpc_url: "https://sepolia.base.org".to_string(),
            private_key: None,
        }
    }
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        ConfirmationSettings {
            poll_interval_ms: 2000,
            max_polls: 90,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ConfirmationSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Settings {
    /// Defaults, then the optional config file, then `COMPOUND__*` variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        let file = match config_file {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = ::config::Config::builder()
            .add_source(file)
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.network.id.trim().is_empty() {
            return Err(SettingsError::Invalid("network.id cannot be empty".to_string()));
        }

        url::Url::parse(&self.network.rpc_url).map_err(|e| {
            SettingsError::Invalid(format!("network.rpc_url '{}': {}", self.network.rpc_url, e))
        })?;

        if self.confirmation.poll_interval_ms == 0 {
            return Err(SettingsError::Invalid(
                "confirmation.poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.confirmation.max_polls == 0 {
            return Err(SettingsError::Invalid(
                "confirmation.max_polls must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn network(&self) -> Network {
        Network::from_network_id(&self.network.id)
    }

    pub fn private_key(&self) -> Result<&str, SettingsError> {
        self.network
            .private_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                SettingsError::Invalid(format!(
                    "no signing key configured, set {}__NETWORK__PRIVATE_KEY",
                    ENV_PREFIX
                ))
            })
    }
}
