//! # Domain Entities
//!
//! Display records rebuilt from chain reads, plus the inputs of the writes
//! that create new records. None of these are validated here; the contract
//! owns every invariant.

use super::value_objects::{Mist, ObjectId, SuiAddress, TransactionResponse};
use serde::{Deserialize, Serialize};

/// A unit of content ownership with divisible shares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel object id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Content category.
    pub category: String,
    /// Creator address.
    pub creator: String,
    /// Shares minted for this channel.
    pub total_shares: u64,
    /// Shares held by the connected account.
    pub user_shares: u64,
    /// Creation time in milliseconds.
    pub created_at: u64,
    /// Whether the channel accepts new activity.
    pub active: bool,
    /// Optional cover image.
    pub image_url: Option<String>,
}

impl Channel {
    /// Connected account's share of the channel, in percent.
    pub fn voting_power(&self) -> f64 {
        if self.total_shares == 0 {
            return 0.0;
        }
        (self.user_shares as f64 / self.total_shares as f64) * 100.0
    }
}

/// A quantity of shares in one channel held by one address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareHolding {
    /// Share object id.
    pub id: String,
    /// Channel these shares belong to.
    pub channel_id: String,
    /// Number of shares.
    pub amount: u64,
    /// Holder address.
    pub owner: String,
}

/// Open offer to sell shares at a fixed price per share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Listing object id.
    pub id: String,
    /// Seller address.
    pub seller: String,
    /// Channel being sold.
    pub channel_id: String,
    /// Display name of the channel.
    pub channel_name: String,
    /// Shares for sale.
    pub amount: u64,
    /// Price per share in MIST.
    pub price_per_share: Mist,
    /// Price of the whole lot in MIST.
    pub total_price: Mist,
    /// Listing time in milliseconds.
    pub listed_at: u64,
    /// Content category.
    pub category: String,
}

impl Listing {
    /// Whether `address` created this listing.
    pub fn is_sold_by(&self, address: &str) -> bool {
        !self.seller.is_empty() && self.seller == address
    }
}

/// Governance record describing a proposed content direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Proposal object id.
    pub id: String,
    /// Channel the proposal governs.
    pub channel_id: String,
    /// Short title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// External content reference (ipfs:// or https://).
    pub content_uri: String,
    /// Voting window start, unix seconds.
    pub start_time: u64,
    /// Voting window end, unix seconds.
    pub end_time: u64,
    /// Proposer address.
    pub proposer: String,
    /// Share-weighted votes in favour.
    pub for_votes: u64,
    /// Share-weighted votes against.
    pub against_votes: u64,
    /// Whether `execute_proposal` has run.
    pub executed: bool,
    /// Outcome recorded at execution.
    pub passed: bool,
}

impl Proposal {
    /// Whether the voting window has closed at `now` (unix seconds).
    pub fn voting_closed(&self, now: u64) -> bool {
        now >= self.end_time
    }
}

/// Input for `channel_nft::create_channel`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChannel {
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Category.
    pub category: String,
    /// Shares to mint to the creator.
    pub initial_shares: u64,
    /// Optional cover image, encoded as UTF-8 bytes on-chain.
    pub image_url: Option<String>,
}

/// Input for `governance::create_proposal`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProposal {
    /// Channel the proposal governs.
    pub channel_id: String,
    /// Short title.
    pub title: String,
    /// Description.
    pub description: String,
    /// External content reference.
    pub content_uri: String,
    /// Voting window length in seconds.
    pub voting_period_secs: u64,
}

/// Result of a successful create-channel write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedChannel {
    /// Execution response.
    pub response: TransactionResponse,
    /// First address-owned object the transaction created.
    pub channel_id: Option<ObjectId>,
}

/// Connected account snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Account address.
    pub address: SuiAddress,
    /// Total SUI balance in MIST.
    pub balance: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(total: u64, user: u64) -> Channel {
        Channel {
            id: "0x1".into(),
            name: "Physics".into(),
            description: String::new(),
            category: "General".into(),
            creator: String::new(),
            total_shares: total,
            user_shares: user,
            created_at: 0,
            active: true,
            image_url: None,
        }
    }

    #[test]
    fn test_voting_power() {
        assert!((channel(1000, 100).voting_power() - 10.0).abs() < f64::EPSILON);
        assert_eq!(channel(0, 100).voting_power(), 0.0);
    }

    #[test]
    fn test_listing_seller_check() {
        let listing = Listing {
            id: "0x2".into(),
            seller: "0xabc".into(),
            channel_id: "1".into(),
            channel_name: "Channel #1".into(),
            amount: 10,
            price_per_share: 1,
            total_price: 10,
            listed_at: 0,
            category: "General".into(),
        };
        assert!(listing.is_sold_by("0xabc"));
        assert!(!listing.is_sold_by("0xdef"));
    }
}
