//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound ports against a Sui fullnode and the local
//! process.

mod notifier;
mod rpc_types;
mod sui_rpc;
mod wallet;

pub use notifier::TracingNotifier;
pub use sui_rpc::SuiRpcReader;
pub use wallet::WatchOnlyWallet;
