//! # KS-01 Chain Gateway
//!
//! Maps KnowScroll intents to Sui Move calls and rebuilds display records
//! from fullnode reads.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Contract Surface
//!
//! | Module        | Entry points                                          |
//! |---------------|-------------------------------------------------------|
//! | `channel_nft` | `create_channel`, `transfer_shares`, `split_shares`   |
//! | `marketplace` | `create_listing`, `purchase_shares`, `cancel_listing` |
//! | `governance`  | `create_proposal`, `cast_vote`, `execute_proposal`    |
//!
//! ## Failure Model
//!
//! A write fails before submission when no wallet is connected or a needed
//! id is not configured, and after submission when the wallet rejects or the
//! chain aborts. Each failure is one returned [`GatewayError`] and one error
//! notification. Nothing is retried. Reads swallow errors and return empty
//! results.
//!
//! Share conservation, vote eligibility, quorum and double-vote prevention
//! are enforced by the contract only.
//!
//! ## Module Structure
//!
//! ```text
//! ks-01-chain-gateway/
//! ├── domain/          # Records, ids, Move call descriptions, mapping, errors
//! ├── ports/           # ChainGatewayApi (inbound) + wallet/reader/notifier (outbound)
//! ├── application/     # ChainGateway service, TransactionBuilder
//! ├── adapters/        # SuiRpcReader, WatchOnlyWallet, TracingNotifier
//! └── config.rs        # GatewayConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{SuiRpcReader, TracingNotifier, WatchOnlyWallet};
pub use application::{ChainGateway, TransactionBuilder};
pub use config::{ConfigError, GatewayConfig, Network};
pub use domain::{
    AccountInfo, CallArg, ChainEvent, ChainObject, Channel, CreatedChannel, EntryPoint,
    GatewayError, Listing, Mist, MissingConfig, MoveCall, NewChannel, NewProposal, Notification,
    NotificationLevel, ObjectId, Proposal, RpcError, ShareHolding, SuiAddress,
    TransactionRequest, TransactionResponse, WalletError, DEFAULT_INITIAL_SHARES, MIST_PER_SUI,
};
pub use ports::{
    ChainGatewayApi, ChainReader, MockChainReader, MockWallet, Notifier, RecordingNotifier,
    WalletPort, MOCK_ADDRESS,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
