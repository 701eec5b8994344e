//! # Transaction Builder
//!
//! Maps each intent to its Move call: entry point plus positional arguments.
//! Also names the struct and event types the reads filter on.

use crate::config::GatewayConfig;
use crate::domain::{
    CallArg, EntryPoint, GatewayError, Mist, MissingConfig, MoveCall, NewChannel, NewProposal,
    ObjectId, SuiAddress,
};

/// Builds Move calls against one deployed package.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    package_id: String,
    channel_registry_id: String,
    marketplace_id: String,
    governance_registry_id: String,
}

impl TransactionBuilder {
    /// Builder over the ids in `config`.
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            package_id: config.package_id.clone(),
            channel_registry_id: config.channel_registry_id.clone(),
            marketplace_id: config.marketplace_id.clone(),
            governance_registry_id: config.governance_registry_id.clone(),
        }
    }

    /// Whether a package id is configured.
    pub fn has_package(&self) -> bool {
        !self.package_id.is_empty()
    }

    fn package(&self) -> Result<&str, GatewayError> {
        require(&self.package_id, MissingConfig::Package)
    }

    fn call(&self, entry_point: EntryPoint, arguments: Vec<CallArg>) -> Result<MoveCall, GatewayError> {
        Ok(MoveCall::new(self.package()?, entry_point, arguments))
    }

    /// `channel_nft::create_channel(registry, name, description, category, initial_shares, image)`
    pub fn create_channel(&self, channel: &NewChannel) -> Result<MoveCall, GatewayError> {
        self.package()?;
        let registry = require(&self.channel_registry_id, MissingConfig::ChannelRegistry)?;
        let image = channel
            .image_url
            .as_ref()
            .filter(|url| !url.is_empty())
            .map(|url| url.as_bytes().to_vec());

        self.call(
            EntryPoint::CreateChannel,
            vec![
                CallArg::Object(ObjectId::new(registry)),
                CallArg::String(channel.name.clone()),
                CallArg::String(channel.description.clone()),
                CallArg::String(channel.category.clone()),
                CallArg::U64(channel.initial_shares),
                CallArg::OptionBytes(image),
            ],
        )
    }

    /// `channel_nft::transfer_shares(share, recipient)`
    pub fn transfer_shares(
        &self,
        share_id: &ObjectId,
        recipient: &SuiAddress,
    ) -> Result<MoveCall, GatewayError> {
        check_object("share", share_id)?;
        if recipient.as_str().is_empty() {
            return Err(GatewayError::InvalidInput("recipient address is empty".to_string()));
        }
        self.call(
            EntryPoint::TransferShares,
            vec![
                CallArg::Object(share_id.clone()),
                CallArg::Address(recipient.clone()),
            ],
        )
    }

    /// `channel_nft::split_shares(share, amount)`
    pub fn split_shares(&self, share_id: &ObjectId, amount: u64) -> Result<MoveCall, GatewayError> {
        check_object("share", share_id)?;
        self.call(
            EntryPoint::SplitShares,
            vec![CallArg::Object(share_id.clone()), CallArg::U64(amount)],
        )
    }

    /// `marketplace::create_listing(marketplace, share, price_per_share)`
    pub fn create_listing(
        &self,
        share_id: &ObjectId,
        price_per_share: Mist,
    ) -> Result<MoveCall, GatewayError> {
        self.package()?;
        let marketplace = require(&self.marketplace_id, MissingConfig::Marketplace)?;
        check_object("share", share_id)?;
        self.call(
            EntryPoint::CreateListing,
            vec![
                CallArg::Object(ObjectId::new(marketplace)),
                CallArg::Object(share_id.clone()),
                CallArg::U64(price_per_share),
            ],
        )
    }

    /// `marketplace::purchase_shares(marketplace, listing, payment, amount)`
    pub fn purchase_shares(
        &self,
        listing_id: &ObjectId,
        payment_coin: &ObjectId,
        amount: u64,
    ) -> Result<MoveCall, GatewayError> {
        self.package()?;
        let marketplace = require(&self.marketplace_id, MissingConfig::Marketplace)?;
        check_object("listing", listing_id)?;
        check_object("payment coin", payment_coin)?;
        self.call(
            EntryPoint::PurchaseShares,
            vec![
                CallArg::Object(ObjectId::new(marketplace)),
                CallArg::Object(listing_id.clone()),
                CallArg::Object(payment_coin.clone()),
                CallArg::U64(amount),
            ],
        )
    }

    /// `marketplace::cancel_listing(listing)`
    pub fn cancel_listing(&self, listing_id: &ObjectId) -> Result<MoveCall, GatewayError> {
        check_object("listing", listing_id)?;
        self.call(
            EntryPoint::CancelListing,
            vec![CallArg::Object(listing_id.clone())],
        )
    }

    /// `governance::create_proposal(registry, channel_id, title, description, content_uri, voting_period)`
    pub fn create_proposal(&self, proposal: &NewProposal) -> Result<MoveCall, GatewayError> {
        self.package()?;
        let registry = require(&self.governance_registry_id, MissingConfig::GovernanceRegistry)?;
        self.call(
            EntryPoint::CreateProposal,
            vec![
                CallArg::Object(ObjectId::new(registry)),
                CallArg::String(proposal.channel_id.clone()),
                CallArg::String(proposal.title.clone()),
                CallArg::String(proposal.description.clone()),
                CallArg::String(proposal.content_uri.clone()),
                CallArg::U64(proposal.voting_period_secs),
            ],
        )
    }

    /// `governance::cast_vote(proposal, share, support)`
    pub fn cast_vote(
        &self,
        proposal_id: &ObjectId,
        share_id: &ObjectId,
        support: bool,
    ) -> Result<MoveCall, GatewayError> {
        check_object("proposal", proposal_id)?;
        check_object("share", share_id)?;
        self.call(
            EntryPoint::CastVote,
            vec![
                CallArg::Object(proposal_id.clone()),
                CallArg::Object(share_id.clone()),
                CallArg::Bool(support),
            ],
        )
    }

    /// `governance::execute_proposal(proposal)`
    pub fn execute_proposal(&self, proposal_id: &ObjectId) -> Result<MoveCall, GatewayError> {
        check_object("proposal", proposal_id)?;
        self.call(
            EntryPoint::ExecuteProposal,
            vec![CallArg::Object(proposal_id.clone())],
        )
    }

    // --- Read-side type names ---

    fn type_name(&self, module: &str, name: &str) -> String {
        format!("{}::{}::{}", self.package_id, module, name)
    }

    /// `{pkg}::channel_nft::Channel`
    pub fn channel_type(&self) -> String {
        self.type_name("channel_nft", "Channel")
    }

    /// `{pkg}::channel_nft::ChannelShare`
    pub fn share_type(&self) -> String {
        self.type_name("channel_nft", "ChannelShare")
    }

    /// `{pkg}::marketplace::Listing`
    pub fn listing_type(&self) -> String {
        self.type_name("marketplace", "Listing")
    }

    /// `{pkg}::governance::Proposal`
    pub fn proposal_type(&self) -> String {
        self.type_name("governance", "Proposal")
    }

    /// `{pkg}::governance::ProposalCreated`
    pub fn proposal_created_event(&self) -> String {
        self.type_name("governance", "ProposalCreated")
    }

    /// Marketplace object id (may be empty).
    pub fn marketplace_id(&self) -> &str {
        &self.marketplace_id
    }

    /// Governance registry object id (may be empty).
    pub fn governance_registry_id(&self) -> &str {
        &self.governance_registry_id
    }
}

fn require(value: &str, missing: MissingConfig) -> Result<&str, GatewayError> {
    if value.is_empty() {
        Err(GatewayError::NotConfigured(missing))
    } else {
        Ok(value)
    }
}

fn check_object(what: &str, id: &ObjectId) -> Result<(), GatewayError> {
    if id.is_empty() {
        return Err(GatewayError::InvalidInput(format!("{what} id is empty")));
    }
    Ok(())
}
