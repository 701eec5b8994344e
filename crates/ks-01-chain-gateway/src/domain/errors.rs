//! # Domain Errors
//!
//! Error types for the Chain Gateway.
//!
//! Every write failure collapses into one [`GatewayError`] whose
//! [`GatewayError::notification`] text is what the user sees.

use thiserror::Error;

/// Configuration value a write needs before it can build its transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingConfig {
    /// Deployed Move package id.
    Package,
    /// Channel registry shared object.
    ChannelRegistry,
    /// Marketplace shared object.
    Marketplace,
    /// Governance registry shared object.
    GovernanceRegistry,
}

impl MissingConfig {
    /// User-facing text for this missing value.
    pub fn notification(&self) -> &'static str {
        match self {
            MissingConfig::Package | MissingConfig::ChannelRegistry => {
                "Contract addresses not configured"
            }
            MissingConfig::Marketplace => "Marketplace not configured",
            MissingConfig::GovernanceRegistry => "Governance registry not configured",
        }
    }

    /// Environment variable that supplies this value.
    pub fn env_var(&self) -> &'static str {
        match self {
            MissingConfig::Package => "KS_PACKAGE_ID",
            MissingConfig::ChannelRegistry => "KS_CHANNEL_REGISTRY",
            MissingConfig::Marketplace => "KS_MARKETPLACE",
            MissingConfig::GovernanceRegistry => "KS_GOVERNANCE_REGISTRY",
        }
    }
}

/// Chain gateway error types.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No wallet account is connected. Raised before any transaction is built.
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// A package or registry id is empty. Raised before any transaction is built.
    #[error("{}", .0.notification())]
    NotConfigured(MissingConfig),

    /// The wallet rejected the transaction or it failed on-chain.
    #[error("Failed to {action}: {reason}")]
    TransactionFailed {
        /// Human-readable action, e.g. "create channel".
        action: &'static str,
        /// Wallet or execution error message.
        reason: String,
    },

    /// Caller supplied an argument the contract cannot accept.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GatewayError {
    /// Message shown to the user as a transient notification.
    pub fn notification(&self) -> String {
        match self {
            GatewayError::WalletNotConnected => "Please connect your wallet first".to_string(),
            other => other.to_string(),
        }
    }

    /// True when the error was raised before submission.
    pub fn is_preflight(&self) -> bool {
        !matches!(self, GatewayError::TransactionFailed { .. })
    }
}

/// Errors reported by the wallet boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// No account is connected.
    #[error("No account connected")]
    NotConnected,

    /// The named wallet is not installed or not known.
    #[error("Wallet not found: {0}")]
    NotFound(String),

    /// The user declined to sign.
    #[error("User rejected the request: {0}")]
    Rejected(String),

    /// This wallet can observe an address but cannot sign for it.
    #[error("Wallet cannot sign transactions")]
    SigningUnavailable,

    /// The node refused or failed to execute the signed transaction.
    #[error("Execution failed: {0}")]
    Execution(String),
}

/// Errors reported by the chain read boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcError {
    /// Could not reach the fullnode.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Transport-level failure (timeout, TLS, HTTP status).
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC Error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },

    /// The response did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}
