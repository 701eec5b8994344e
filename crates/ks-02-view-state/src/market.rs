//! # Marketplace View
//!
//! Listing filters, market statistics, purchase quotes and the create-listing
//! form.

use crate::errors::FormError;
use crate::format::{format_sui, sui_to_mist};
use ks_01_chain_gateway::{Channel, Listing, Mist, MIST_PER_SUI};
use serde::{Deserialize, Serialize};

/// Channels shown in the selector before "show all".
pub const COLLAPSED_CHANNEL_COUNT: usize = 3;

/// Leading integer of `input`, the way a lenient number field reads it
/// (`"12abc"` is 12, `"abc"` is nothing).
fn leading_integer(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

/// Clamp a raw purchase amount to `[1, listing_amount]`.
///
/// Unparseable or zero input counts as 1. A listing with no shares left
/// clamps to 0.
pub fn clamp_purchase_amount(input: &str, listing_amount: u64) -> u64 {
    let requested = match leading_integer(input) {
        None | Some(0) => 1,
        Some(n) => n.max(1),
    };
    // requested >= 1 here
    (requested as u64).min(listing_amount)
}

/// Cost of buying `amount` shares from one listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseQuote {
    /// Listing being bought from.
    pub listing_id: String,
    /// Shares to buy.
    pub amount: u64,
    /// Price per share in MIST.
    pub price_per_share: Mist,
    /// Total cost in MIST.
    pub total_cost: Mist,
}

impl PurchaseQuote {
    /// Quote for `amount` shares of `listing`, clamped to what is listed.
    pub fn new(listing: &Listing, amount: u64) -> Self {
        let amount = amount.max(1).min(listing.amount);
        Self {
            listing_id: listing.id.clone(),
            amount,
            price_per_share: listing.price_per_share,
            total_cost: amount.saturating_mul(listing.price_per_share),
        }
    }

    /// Total cost in SUI, four decimals.
    pub fn total_sui(&self) -> String {
        format_sui(self.total_cost)
    }
}

/// Validate a purchase before dispatch.
pub fn prepare_purchase(
    listing: &Listing,
    buyer: Option<&str>,
    raw_amount: &str,
) -> Result<PurchaseQuote, FormError> {
    let buyer = buyer.ok_or(FormError::WalletNotConnected)?;
    if listing.is_sold_by(buyer) {
        return Err(FormError::OwnListing);
    }
    let amount = clamp_purchase_amount(raw_amount, listing.amount);
    if amount == 0 {
        return Err(FormError::InvalidAmount(raw_amount.to_string()));
    }
    Ok(PurchaseQuote::new(listing, amount))
}

/// Raw create-listing form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingForm {
    /// Price per share in SUI, as typed.
    pub price_sui: String,
    /// Share amount, as typed.
    pub amount: String,
}

/// Validated create-listing input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListingDraft {
    /// Price per share in MIST.
    pub price_per_share: Mist,
    /// Shares to list.
    pub amount: u64,
}

impl ListingForm {
    /// Check both fields and convert the price to MIST.
    pub fn validate(&self) -> Result<ListingDraft, FormError> {
        if self.price_sui.trim().is_empty() || self.amount.trim().is_empty() {
            return Err(FormError::MissingFields);
        }
        let price_per_share = sui_to_mist(&self.price_sui)?;
        let amount = self
            .amount
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|a| *a > 0)
            .ok_or_else(|| FormError::InvalidAmount(self.amount.clone()))?;
        Ok(ListingDraft {
            price_per_share,
            amount,
        })
    }

    /// Estimated proceeds in SUI, four decimals; zero while incomplete.
    pub fn estimated_total(&self) -> String {
        let price: f64 = self.price_sui.trim().parse().unwrap_or(0.0);
        let amount = leading_integer(&self.amount).unwrap_or(0);
        format!("{:.4}", price * amount as f64)
    }

    /// Clear both fields after a successful listing.
    pub fn clear(&mut self) {
        self.price_sui.clear();
        self.amount.clear();
    }
}

/// Listings for `selected` channel, or all when none is selected.
pub fn filter_listings(listings: &[Listing], selected: Option<&str>) -> Vec<Listing> {
    match selected {
        Some(channel) => listings
            .iter()
            .filter(|l| l.channel_id == channel)
            .cloned()
            .collect(),
        None => listings.to_vec(),
    }
}

/// Market summary over every listing (not just the filtered ones).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStats {
    /// Number of open listings.
    pub total_listings: usize,
    /// Traded volume. No trade history is indexed, so always "0".
    pub total_volume: String,
    /// Mean price per share in SUI, four decimals, or "0".
    pub average_price: String,
}

impl MarketStats {
    /// Summarise `listings`.
    pub fn from_listings(listings: &[Listing]) -> Self {
        let average_price = if listings.is_empty() {
            "0".to_string()
        } else {
            let sum: u128 = listings.iter().map(|l| l.price_per_share as u128).sum();
            let mean = sum as f64 / listings.len() as f64 / MIST_PER_SUI as f64;
            format!("{mean:.4}")
        };
        Self {
            total_listings: listings.len(),
            total_volume: "0".to_string(),
            average_price,
        }
    }
}

/// Channels the account holds shares in, first three unless `show_all`.
pub fn channels_with_holdings(channels: &[Channel], show_all: bool) -> Vec<&Channel> {
    let held = channels.iter().filter(|c| c.user_shares > 0);
    if show_all {
        held.collect()
    } else {
        held.take(COLLAPSED_CHANNEL_COUNT).collect()
    }
}

/// Keep `selected` only if it is still among `channels`.
pub fn reconcile_selection(selected: Option<String>, channels: &[Channel]) -> Option<String> {
    selected.filter(|id| channels.iter().any(|c| &c.id == id))
}
