//! # KS-02 View State
//!
//! Page-level state shaped from chain gateway records: refresh tracking,
//! marketplace math, proposal status and the publish flow.
//!
//! **Subsystem ID:** 02
//!
//! Nothing here talks to the chain directly except [`PublishFlow::publish`],
//! which goes through [`ks_01_chain_gateway::ChainGatewayApi`].
//!
//! ## Module Structure
//!
//! ```text
//! ks-02-view-state/
//! ├── refresh.rs      # RefreshCounter, Refetch, ViewLoader
//! ├── market.rs       # Purchase clamping, quotes, listing form, stats
//! ├── governance.rs   # ProposalStatus, views, ordering, draft form
//! ├── publish.rs      # Upload-to-channel step sequence
//! ├── format.rs       # SUI amounts, relative times
//! └── errors.rs       # FormError
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod format;
pub mod governance;
pub mod market;
pub mod publish;
pub mod refresh;

// Re-exports
pub use errors::FormError;
pub use format::{
    format_min_voting_period, format_sui, format_sui_balance, sui_to_mist, time_ago,
    time_remaining,
};
pub use governance::{
    compare_proposals, proposal_views, PendingAction, ProposalDraft, ProposalStats,
    ProposalStatus, ProposalView, DEFAULT_MIN_VOTING_PERIOD_SECS, DEFAULT_VOTING_PERIOD_SECS,
    VOTING_PERIOD_OPTIONS,
};
pub use market::{
    channels_with_holdings, clamp_purchase_amount, filter_listings, prepare_purchase,
    reconcile_selection, ListingDraft, ListingForm, MarketStats, PurchaseQuote,
};
pub use publish::{
    ContentMetadata, PublishFlow, PublishStep, SeriesInfo, VideoFile, CATEGORIES,
    PUBLISH_SUCCESS_MESSAGE,
};
pub use refresh::{RefreshCounter, Refetch, ViewLoader};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
