//! # Chain Gateway Configuration
//!
//! Deployed package and registry ids plus fullnode transport settings.
//!
//! Ids are supplied by the environment and may be absent. An absent id is
//! not a configuration error; the write that needs it refuses to build its
//! transaction instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sui network the gateway talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Local validator.
    Localnet,
    /// Devnet.
    Devnet,
    /// Testnet.
    #[default]
    Testnet,
    /// Mainnet.
    Mainnet,
}

impl Network {
    /// Lowercase network name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Localnet => "localnet",
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
        }
    }

    /// Public fullnode JSON-RPC endpoint.
    pub fn fullnode_url(&self) -> String {
        match self {
            Network::Localnet => "http://127.0.0.1:9000".to_string(),
            other => format!("https://fullnode.{}.sui.io:443", other.as_str()),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "localnet" => Ok(Network::Localnet),
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Network name not recognised.
    #[error("Unknown network: {0} (expected localnet, devnet, testnet or mainnet)")]
    UnknownNetwork(String),

    /// A numeric setting could not be parsed or is zero.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting name.
        key: &'static str,
        /// Offending value.
        value: String,
    },

    /// An id is present but is not `0x`-prefixed hex.
    #[error("Malformed object id for {key}: {value}")]
    MalformedId {
        /// Setting name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Chain gateway configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Target network.
    pub network: Network,

    /// Fullnode URL override. Empty means the network's public fullnode.
    pub rpc_url: String,

    /// Deployed Move package id.
    pub package_id: String,

    /// `channel_nft` registry shared object.
    pub channel_registry_id: String,

    /// `marketplace` shared object.
    pub marketplace_id: String,

    /// `governance` registry shared object.
    pub governance_registry_id: String,

    /// Per-request transport timeout in seconds.
    pub request_timeout_secs: u64,

    /// Items requested per RPC page.
    pub page_limit: usize,

    /// Upper bound on pages followed per query.
    pub max_pages: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            rpc_url: String::new(),
            package_id: String::new(),
            channel_registry_id: String::new(),
            marketplace_id: String::new(),
            governance_registry_id: String::new(),
            request_timeout_secs: 30,
            page_limit: 50,
            max_pages: 10,
        }
    }
}

impl GatewayConfig {
    /// Create a config for testing (every id populated).
    pub fn for_testing() -> Self {
        Self {
            network: Network::Localnet,
            rpc_url: String::new(),
            package_id: "0x0000000000000000000000000000000000000000000000000000000000c0ffee"
                .to_string(),
            channel_registry_id: "0x00000000000000000000000000000000000000000000000000000000000000c1"
                .to_string(),
            marketplace_id: "0x00000000000000000000000000000000000000000000000000000000000000d1"
                .to_string(),
            governance_registry_id:
                "0x00000000000000000000000000000000000000000000000000000000000000e1".to_string(),
            request_timeout_secs: 5,
            page_limit: 10,
            max_pages: 2,
        }
    }

    /// Load from `KS_*` environment variables on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup on top of the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(network) = get("KS_NETWORK") {
            config.network = network.parse()?;
        }
        if let Some(url) = get("KS_RPC_URL") {
            config.rpc_url = url;
        }
        if let Some(id) = get("KS_PACKAGE_ID") {
            config.package_id = id;
        }
        if let Some(id) = get("KS_CHANNEL_REGISTRY") {
            config.channel_registry_id = id;
        }
        if let Some(id) = get("KS_MARKETPLACE") {
            config.marketplace_id = id;
        }
        if let Some(id) = get("KS_GOVERNANCE_REGISTRY") {
            config.governance_registry_id = id;
        }
        if let Some(secs) = get("KS_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs =
                secs.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "KS_REQUEST_TIMEOUT_SECS",
                    value: secs.clone(),
                })?;
        }
        Ok(config)
    }

    /// Check limits and the shape of every id that is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("request_timeout_secs", self.request_timeout_secs),
            ("page_limit", u64::try_from(self.page_limit).unwrap_or(u64::MAX)),
            ("max_pages", u64::try_from(self.max_pages).unwrap_or(u64::MAX)),
        ];
        for (key, value) in limits {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: value.to_string(),
                });
            }
        }

        let ids = [
            ("package_id", &self.package_id),
            ("channel_registry_id", &self.channel_registry_id),
            ("marketplace_id", &self.marketplace_id),
            ("governance_registry_id", &self.governance_registry_id),
        ];
        for (key, value) in ids {
            if !value.is_empty() && !crate::domain::ObjectId::new(value.as_str()).is_well_formed() {
                return Err(ConfigError::MalformedId {
                    key,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Fullnode URL, honouring the override.
    pub fn rpc_endpoint(&self) -> String {
        if self.rpc_url.is_empty() {
            self.network.fullnode_url()
        } else {
            self.rpc_url.clone()
        }
    }

    /// Block explorer page for `address`.
    pub fn explorer_account_url(&self, address: &str) -> String {
        format!("https://suiscan.xyz/{}/account/{}", self.network, address)
    }
}
