//! # View Errors
//!
//! Form and flow errors. Display strings are the notification text.

use thiserror::Error;

/// Errors raised while validating user input or stepping a page flow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    /// A required field is blank.
    #[error("Please fill in all fields")]
    MissingFields,

    /// Action needs a connected wallet.
    #[error("Please connect your wallet first")]
    WalletNotConnected,

    /// Price is not a non-negative decimal.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Amount is not a positive integer.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Buyer is the seller.
    #[error("You cannot purchase your own listing")]
    OwnListing,

    /// Selected file is not a video.
    #[error("Please select a video file")]
    NotAVideo,

    /// Voting window shorter than allowed.
    #[error("Voting period must be at least {0}")]
    VotingPeriodTooShort(String),

    /// Operation not valid in the current step.
    #[error("Cannot {action} while {step}")]
    WrongStep {
        /// Attempted operation.
        action: &'static str,
        /// Current step name.
        step: &'static str,
    },

    /// The create-channel write behind publishing failed.
    #[error("Failed to publish reel")]
    PublishFailed,
}
