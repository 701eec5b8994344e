//! # Inbound Ports
//!
//! API trait defining what the Chain Gateway can do.

use crate::domain::{
    AccountInfo, Channel, CreatedChannel, GatewayError, Listing, Mist, NewChannel, NewProposal, ObjectId,
    Proposal, ShareHolding, SuiAddress, TransactionResponse, WalletError,
};
use async_trait::async_trait;

/// Chain Gateway API - inbound port.
///
/// Writes fail with exactly one [`GatewayError`] and exactly one error
/// notification. Reads never fail: a chain error or a missing wallet yields
/// an empty result.
#[async_trait]
pub trait ChainGatewayApi: Send + Sync {
    // --- Wallet session ---

    /// Connect the named wallet.
    async fn connect(&self, wallet_name: &str) -> Result<SuiAddress, WalletError>;

    /// Disconnect the current wallet.
    async fn disconnect(&self) -> Result<(), WalletError>;

    /// Whether an account is connected.
    fn is_connected(&self) -> bool;

    /// Connected account, if any.
    fn address(&self) -> Option<SuiAddress>;

    /// True while any write is awaiting execution.
    fn is_loading(&self) -> bool;

    /// Block explorer page of the connected account.
    fn explorer_url(&self) -> Option<String>;

    // --- Writes ---

    /// `channel_nft::create_channel`.
    async fn create_channel(&self, channel: NewChannel) -> Result<CreatedChannel, GatewayError>;

    /// `channel_nft::transfer_shares`.
    async fn transfer_shares(
        &self,
        share_id: &ObjectId,
        recipient: &SuiAddress,
    ) -> Result<TransactionResponse, GatewayError>;

    /// `channel_nft::split_shares`.
    async fn split_shares(
        &self,
        share_id: &ObjectId,
        amount: u64,
    ) -> Result<TransactionResponse, GatewayError>;

    /// `marketplace::create_listing`.
    async fn create_listing(
        &self,
        share_id: &ObjectId,
        price_per_share: Mist,
    ) -> Result<TransactionResponse, GatewayError>;

    /// `marketplace::purchase_shares`, paying with `payment_coin`.
    async fn purchase_shares(
        &self,
        listing_id: &ObjectId,
        payment_coin: &ObjectId,
        amount: u64,
    ) -> Result<TransactionResponse, GatewayError>;

    /// `marketplace::cancel_listing`.
    async fn cancel_listing(&self, listing_id: &ObjectId)
        -> Result<TransactionResponse, GatewayError>;

    /// `governance::create_proposal`.
    async fn create_proposal(
        &self,
        proposal: NewProposal,
    ) -> Result<TransactionResponse, GatewayError>;

    /// `governance::cast_vote` weighted by `share_id`.
    async fn cast_vote(
        &self,
        proposal_id: &ObjectId,
        share_id: &ObjectId,
        support: bool,
    ) -> Result<TransactionResponse, GatewayError>;

    /// `governance::execute_proposal`.
    async fn execute_proposal(
        &self,
        proposal_id: &ObjectId,
    ) -> Result<TransactionResponse, GatewayError>;

    // --- Reads ---

    /// Channels owned by the connected account.
    async fn owned_channels(&self) -> Vec<Channel>;

    /// Share objects owned by the connected account.
    async fn owned_shares(&self) -> Vec<ShareHolding>;

    /// Listings held by the marketplace.
    async fn listings(&self) -> Vec<Listing>;

    /// Proposals created for `channel_id`, newest first.
    async fn channel_proposals(&self, channel_id: &str) -> Vec<Proposal>;

    /// Proposal objects held by the governance registry.
    async fn proposal_objects(&self) -> Vec<Proposal>;

    /// SUI balance of the connected account in MIST.
    async fn balance(&self) -> u128;

    /// Connected account with its balance; `None` without a wallet.
    async fn account(&self) -> Option<AccountInfo>;
}
