use serde::Serialize;
use thiserror::Error;

/// Failures raised by the on-chain read and write capabilities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Contract call failed: {0}")]
    ContractError(String),

    #[error("Failed to decode contract response: {0}")]
    DecodeError(String),

    #[error("Signer error: {0}")]
    SignerError(String),

    #[error("Transaction {0} reverted")]
    Reverted(String),

    #[error("Transaction {hash} not confirmed after {polls} polls")]
    ConfirmationTimeout { hash: String, polls: u32 },
}

/// Failures raised by the asset registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("asset '{0}' not found")]
    NotFound(String),

    #[error("asset registry unavailable: {0}")]
    Unavailable(String),
}

/// Failures converting between atomic and human-readable amounts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnitError {
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("amount {0} is negative")]
    Negative(String),

    #[error("amount {0} is out of range")]
    Overflow(String),

    #[error("unsupported decimal count {0}")]
    UnsupportedDecimals(u32),

    #[error("collateral factor {0} is above 1e18")]
    FactorOutOfRange(u64),
}

/// Errors surfaced by the position reader and the health ratio engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Units(#[from] UnitError),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Category of a failed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionErrorKind {
    Validation,
    InsufficientBalance,
    UnhealthyPosition,
    ApprovalFailed,
    ExternalCallFailed,
    AssetNotFound,
}

/// A failed action. `message` is the text handed back to the calling agent.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ActionError {
    pub kind: ActionErrorKind,
    pub message: String,
}

impl ActionError {
    pub fn new(kind: ActionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(reason: impl std::fmt::Display) -> Self {
        Self::new(ActionErrorKind::Validation, format!("Error: {}", reason))
    }

    pub fn insufficient_balance(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::InsufficientBalance, message)
    }

    pub fn unhealthy_position(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::UnhealthyPosition, message)
    }

    pub fn approval_failed(reason: impl std::fmt::Display) -> Self {
        Self::new(
            ActionErrorKind::ApprovalFailed,
            format!("Error approving Compound as spender: {}", reason),
        )
    }

    pub fn external(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::ExternalCallFailed, message)
    }

    pub fn kind(&self) -> ActionErrorKind {
        self.kind
    }
}

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
