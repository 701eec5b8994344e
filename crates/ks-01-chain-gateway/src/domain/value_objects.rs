//! # Value Objects
//!
//! Identifiers, Move call descriptions and transaction envelopes exchanged
//! with the wallet and the fullnode.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Amount in MIST (1 SUI = 10^9 MIST).
pub type Mist = u64;

/// MIST per SUI.
pub const MIST_PER_SUI: u64 = 1_000_000_000;

/// Shares minted when the publish flow creates a channel.
pub const DEFAULT_INITIAL_SHARES: u64 = 1000;

fn is_hex_id(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(hex) => !hex.is_empty() && hex.len() <= 64 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

// Ten characters or fewer are kept whole; the shortened form would be no shorter.
fn shorten(s: &str) -> String {
    if s.len() <= 10 || !s.is_ascii() {
        return s.to_string();
    }
    format!("{}...{}", &s[..6], &s[s.len() - 4..])
}

/// Sui account address (`0x`-prefixed hex).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuiAddress(String);

impl SuiAddress {
    /// Wrap an address string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Borrow the raw string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x` followed by 1 to 64 hex digits.
    pub fn is_well_formed(&self) -> bool {
        is_hex_id(&self.0)
    }

    /// Display form: first six characters, an ellipsis, last four.
    pub fn short(&self) -> String {
        shorten(&self.0)
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SuiAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Sui object id (`0x`-prefixed hex).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wrap an object id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the id is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `0x` followed by 1 to 64 hex digits.
    pub fn is_well_formed(&self) -> bool {
        is_hex_id(&self.0)
    }

    /// Display form: first six characters, an ellipsis, last four.
    pub fn short(&self) -> String {
        shorten(&self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Contract entry points the gateway can call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPoint {
    /// `channel_nft::create_channel`
    CreateChannel,
    /// `channel_nft::transfer_shares`
    TransferShares,
    /// `channel_nft::split_shares`
    SplitShares,
    /// `marketplace::create_listing`
    CreateListing,
    /// `marketplace::purchase_shares`
    PurchaseShares,
    /// `marketplace::cancel_listing`
    CancelListing,
    /// `governance::create_proposal`
    CreateProposal,
    /// `governance::cast_vote`
    CastVote,
    /// `governance::execute_proposal`
    ExecuteProposal,
}

impl EntryPoint {
    /// Every entry point, in contract order.
    pub const ALL: [EntryPoint; 9] = [
        EntryPoint::CreateChannel,
        EntryPoint::TransferShares,
        EntryPoint::SplitShares,
        EntryPoint::CreateListing,
        EntryPoint::PurchaseShares,
        EntryPoint::CancelListing,
        EntryPoint::CreateProposal,
        EntryPoint::CastVote,
        EntryPoint::ExecuteProposal,
    ];

    /// Move module name.
    pub fn module(&self) -> &'static str {
        match self {
            EntryPoint::CreateChannel | EntryPoint::TransferShares | EntryPoint::SplitShares => {
                "channel_nft"
            }
            EntryPoint::CreateListing | EntryPoint::PurchaseShares | EntryPoint::CancelListing => {
                "marketplace"
            }
            EntryPoint::CreateProposal | EntryPoint::CastVote | EntryPoint::ExecuteProposal => {
                "governance"
            }
        }
    }

    /// Move function name.
    pub fn function(&self) -> &'static str {
        match self {
            EntryPoint::CreateChannel => "create_channel",
            EntryPoint::TransferShares => "transfer_shares",
            EntryPoint::SplitShares => "split_shares",
            EntryPoint::CreateListing => "create_listing",
            EntryPoint::PurchaseShares => "purchase_shares",
            EntryPoint::CancelListing => "cancel_listing",
            EntryPoint::CreateProposal => "create_proposal",
            EntryPoint::CastVote => "cast_vote",
            EntryPoint::ExecuteProposal => "execute_proposal",
        }
    }

    /// Fully qualified call target, `{package}::{module}::{function}`.
    pub fn target(&self, package_id: &str) -> String {
        format!("{}::{}::{}", package_id, self.module(), self.function())
    }

    /// Verb phrase used in failure messages.
    pub fn action(&self) -> &'static str {
        match self {
            EntryPoint::CreateChannel => "create channel",
            EntryPoint::TransferShares => "transfer shares",
            EntryPoint::SplitShares => "split shares",
            EntryPoint::CreateListing => "create listing",
            EntryPoint::PurchaseShares => "purchase shares",
            EntryPoint::CancelListing => "cancel listing",
            EntryPoint::CreateProposal => "create proposal",
            EntryPoint::CastVote => "cast vote",
            EntryPoint::ExecuteProposal => "execute proposal",
        }
    }

    /// Success notification. Votes carry their direction, see [`vote_success_message`].
    pub fn success_message(&self) -> &'static str {
        match self {
            EntryPoint::CreateChannel => "Channel created successfully!",
            EntryPoint::TransferShares => "Shares transferred successfully!",
            EntryPoint::SplitShares => "Shares split successfully!",
            EntryPoint::CreateListing => "Listing created successfully!",
            EntryPoint::PurchaseShares => "Shares purchased successfully!",
            EntryPoint::CancelListing => "Listing cancelled successfully!",
            EntryPoint::CreateProposal => "Proposal created successfully!",
            EntryPoint::CastVote => "Vote cast successfully!",
            EntryPoint::ExecuteProposal => "Proposal executed successfully!",
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module(), self.function())
    }
}

/// Success text for a vote in the given direction.
pub fn vote_success_message(support: bool) -> String {
    format!(
        "Vote cast successfully! You voted {} the proposal.",
        if support { "for" } else { "against" }
    )
}

/// One positional argument of a Move call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CallArg {
    /// Object input by id.
    Object(ObjectId),
    /// Pure `0x1::string::String`.
    String(String),
    /// Pure `u64`.
    U64(u64),
    /// Pure `bool`.
    Bool(bool),
    /// Pure `address`.
    Address(SuiAddress),
    /// Pure `Option<vector<u8>>`.
    OptionBytes(Option<Vec<u8>>),
}

/// A described Move call, ready for the wallet to encode and sign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCall {
    /// Entry point being invoked.
    pub entry_point: EntryPoint,
    /// `{package}::{module}::{function}`.
    pub target: String,
    /// Positional arguments.
    pub arguments: Vec<CallArg>,
}

impl MoveCall {
    /// Describe a call to `entry_point` in `package_id`.
    pub fn new(package_id: &str, entry_point: EntryPoint, arguments: Vec<CallArg>) -> Self {
        Self {
            entry_point,
            target: entry_point.target(package_id),
            arguments,
        }
    }
}

/// What the wallet should include in the execution response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteOptions {
    /// Include emitted events.
    pub show_events: bool,
    /// Include transaction effects.
    pub show_effects: bool,
    /// Include object changes.
    pub show_object_changes: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            show_events: true,
            show_effects: true,
            show_object_changes: true,
        }
    }
}

/// A transaction handed to the wallet for signing and execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Signing account.
    pub sender: SuiAddress,
    /// The single Move call this transaction performs.
    pub call: MoveCall,
    /// Response options.
    pub options: ExecuteOptions,
}

impl TransactionRequest {
    /// Wrap a call with default response options.
    pub fn new(sender: SuiAddress, call: MoveCall) -> Self {
        Self {
            sender,
            call,
            options: ExecuteOptions::default(),
        }
    }
}

/// Owner of a chain object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectOwner {
    /// Owned by an account.
    AddressOwner(SuiAddress),
    /// Owned by another object.
    ObjectOwner(ObjectId),
    /// Shared object.
    Shared,
    /// Frozen object.
    Immutable,
}

/// Object created by a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedObject {
    /// New object's id.
    pub object_id: ObjectId,
    /// Who owns it after execution.
    pub owner: ObjectOwner,
}

/// On-chain execution outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Effects were applied.
    Success,
    /// Execution aborted with the given reason.
    Failure(String),
}

/// Result of signing and executing a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// Transaction digest.
    pub digest: String,
    /// Execution outcome.
    pub status: ExecutionStatus,
    /// Objects created, in effects order.
    pub created: Vec<CreatedObject>,
    /// Events emitted.
    pub events: Vec<ChainEvent>,
}

impl TransactionResponse {
    /// A successful response with no side information.
    pub fn success(digest: impl Into<String>) -> Self {
        Self {
            digest: digest.into(),
            status: ExecutionStatus::Success,
            created: Vec::new(),
            events: Vec::new(),
        }
    }

    /// First created object owned by an address.
    pub fn first_address_owned(&self) -> Option<&ObjectId> {
        self.created
            .iter()
            .find(|obj| matches!(obj.owner, ObjectOwner::AddressOwner(_)))
            .map(|obj| &obj.object_id)
    }
}

/// Raw object as returned by an owned-objects query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainObject {
    /// Object id, when the node returned one.
    pub object_id: Option<ObjectId>,
    /// Fully qualified Move type.
    pub object_type: Option<String>,
    /// Move struct fields.
    pub fields: Map<String, Value>,
}

impl ChainObject {
    /// Object with an id and a set of fields.
    pub fn new(object_id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            object_id: Some(ObjectId::new(object_id)),
            object_type: None,
            fields,
        }
    }
}

/// Raw Move event as returned by an event query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEvent {
    /// Fully qualified event type.
    pub event_type: String,
    /// Event payload.
    pub parsed_json: Value,
    /// Checkpoint timestamp in milliseconds.
    pub timestamp_ms: Option<u64>,
    /// Emitting transaction.
    pub tx_digest: String,
}

/// Severity of a user notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Action completed.
    Success,
    /// Action aborted.
    Error,
}

/// Transient message surfaced to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Display text.
    pub message: String,
}

impl Notification {
    /// Success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_point_targets() {
        assert_eq!(
            EntryPoint::CreateChannel.target("0xabc"),
            "0xabc::channel_nft::create_channel"
        );
        assert_eq!(
            EntryPoint::PurchaseShares.target("0xabc"),
            "0xabc::marketplace::purchase_shares"
        );
        assert_eq!(
            EntryPoint::ExecuteProposal.target("0xabc"),
            "0xabc::governance::execute_proposal"
        );
    }

    #[test]
    fn test_entry_points_are_distinct() {
        let targets: std::collections::HashSet<_> =
            EntryPoint::ALL.iter().map(|e| e.target("0x1")).collect();
        assert_eq!(targets.len(), EntryPoint::ALL.len());
    }

    #[test]
    fn test_address_short_form() {
        let addr = SuiAddress::new("0x1234567890abcdef");
        assert_eq!(addr.short(), "0x1234...cdef");

        let tiny = SuiAddress::new("0x12");
        assert_eq!(tiny.short(), "0x12");

        let ten = SuiAddress::new("0x12345678");
        assert_eq!(ten.short(), "0x12345678");

        let full = SuiAddress::new(format!("0x{}c0de", "ab".repeat(30)));
        assert_eq!(full.as_str().len(), 66);
        assert_eq!(full.short(), "0xabab...c0de");
    }

    #[test]
    fn test_object_id_well_formed() {
        assert!(ObjectId::new("0xdeadBEEF").is_well_formed());
        assert!(!ObjectId::new("deadbeef").is_well_formed());
        assert!(!ObjectId::new("0x").is_well_formed());
        assert!(!ObjectId::new("0xzz").is_well_formed());
    }

    #[test]
    fn test_vote_success_message() {
        assert_eq!(
            vote_success_message(true),
            "Vote cast successfully! You voted for the proposal."
        );
        assert_eq!(
            vote_success_message(false),
            "Vote cast successfully! You voted against the proposal."
        );
    }

    #[test]
    fn test_first_address_owned() {
        let mut response = TransactionResponse::success("digest");
        response.created = vec![
            CreatedObject {
                object_id: ObjectId::new("0x1"),
                owner: ObjectOwner::Shared,
            },
            CreatedObject {
                object_id: ObjectId::new("0x2"),
                owner: ObjectOwner::AddressOwner(SuiAddress::new("0xa")),
            },
        ];
        assert_eq!(response.first_address_owned(), Some(&ObjectId::new("0x2")));
    }

    #[test]
    fn test_call_arg_serialization() {
        let arg = CallArg::U64(1000);
        let json = serde_json::to_value(&arg).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "u64", "value": 1000}));
    }
}
