//! # Application Module
//!
//! Application services orchestrating the domain and outbound ports.

pub mod service;
pub mod tx_builder;

pub use service::ChainGateway;
pub use tx_builder::TransactionBuilder;
