//! # Record Mapping
//!
//! Turns raw chain objects and events into display records. Missing or
//! malformed fields never fail the mapping; they fall back to the defaults
//! below.
//!
//! Sui renders `u64` as JSON strings, `UID`/`ID` as `{ "id": "0x..." }` and
//! `Option<T>` as `{ "vec": [..] }`; the accessors accept all of these.

use super::entities::{Channel, Listing, Proposal, ShareHolding};
use super::value_objects::{ChainEvent, ChainObject, Mist, MIST_PER_SUI};
use serde_json::{Map, Value};

/// Total shares assumed when a channel does not report them.
pub const DEFAULT_TOTAL_SHARES: u64 = 1000;
/// Holder shares assumed when a channel does not report them.
pub const DEFAULT_USER_SHARES: u64 = 100;
/// Category assumed when none is set.
pub const DEFAULT_CATEGORY: &str = "General";
/// Listing size assumed when none is reported.
pub const DEFAULT_LISTING_AMOUNT: u64 = 100;
/// Price per share assumed when none is reported (1 SUI).
pub const DEFAULT_PRICE_PER_SHARE: Mist = MIST_PER_SUI;
/// Lot price assumed when none is reported (100 SUI).
pub const DEFAULT_TOTAL_PRICE: Mist = 100 * MIST_PER_SUI;

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => {
            if let Some(id) = map.get("id") {
                return value_text(id);
            }
            map.get("vec")
                .and_then(Value::as_array)
                .and_then(|items| items.first())
                .and_then(value_text)
        }
        // vector<u8> holding UTF-8
        Value::Array(items) if !items.is_empty() => {
            let bytes: Option<Vec<u8>> = items
                .iter()
                .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect();
            bytes
                .and_then(|b| String::from_utf8(b).ok())
                .filter(|s| !s.is_empty())
        }
        _ => None,
    }
}

/// Text value of `key`, `None` when absent or empty.
pub fn field_str(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(value_text)
}

/// Unsigned value of `key`, accepting strings and numbers.
pub fn field_u64(fields: &Map<String, Value>, key: &str) -> Option<u64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Boolean value of `key`, accepting `true`/`false` strings.
pub fn field_bool(fields: &Map<String, Value>, key: &str) -> Option<bool> {
    match fields.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn object_id(obj: &ChainObject) -> Option<String> {
    obj.object_id
        .as_ref()
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
        .or_else(|| field_str(&obj.fields, "id"))
}

/// Current wall-clock time in milliseconds.
pub fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Current wall-clock time in unix seconds.
pub fn now_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// Map an owned `channel_nft::Channel` object. `index` is its position in
/// the query result.
pub fn channel_from_object(obj: &ChainObject, index: usize) -> Channel {
    let f = &obj.fields;
    Channel {
        id: object_id(obj).unwrap_or_else(|| format!("channel-{index}")),
        name: field_str(f, "name").unwrap_or_else(|| format!("Channel #{}", index + 1)),
        description: field_str(f, "description").unwrap_or_default(),
        category: field_str(f, "category").unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        creator: field_str(f, "creator").unwrap_or_default(),
        total_shares: field_u64(f, "total_shares").unwrap_or(DEFAULT_TOTAL_SHARES),
        user_shares: field_u64(f, "user_shares").unwrap_or(DEFAULT_USER_SHARES),
        created_at: field_u64(f, "created_at").unwrap_or(0),
        active: field_bool(f, "active").unwrap_or(true),
        image_url: field_str(f, "image_url"),
    }
}

/// Map an owned `channel_nft::ChannelShare` object held by `owner`.
pub fn share_from_object(obj: &ChainObject, index: usize, owner: &str) -> ShareHolding {
    let f = &obj.fields;
    ShareHolding {
        id: object_id(obj).unwrap_or_else(|| format!("share-{index}")),
        channel_id: field_str(f, "channel_id").unwrap_or_default(),
        amount: field_u64(f, "amount").unwrap_or(0),
        owner: field_str(f, "owner").unwrap_or_else(|| owner.to_string()),
    }
}

/// Map a `marketplace::Listing` object. `now_ms` stands in for a missing
/// listing time.
pub fn listing_from_object(obj: &ChainObject, index: usize, now_ms: u64) -> Listing {
    let f = &obj.fields;
    let channel_id = field_str(f, "channel_id").unwrap_or_else(|| (index + 1).to_string());
    Listing {
        id: object_id(obj).unwrap_or_else(|| format!("listing-{index}")),
        seller: field_str(f, "seller").unwrap_or_default(),
        channel_name: format!("Channel #{channel_id}"),
        channel_id,
        amount: field_u64(f, "amount").unwrap_or(DEFAULT_LISTING_AMOUNT),
        price_per_share: field_u64(f, "price_per_share").unwrap_or(DEFAULT_PRICE_PER_SHARE),
        total_price: field_u64(f, "total_price").unwrap_or(DEFAULT_TOTAL_PRICE),
        listed_at: field_u64(f, "listed_at").unwrap_or(now_ms),
        category: DEFAULT_CATEGORY.to_string(),
    }
}

fn proposal_from_fields(id: String, f: &Map<String, Value>) -> Proposal {
    Proposal {
        id,
        channel_id: field_str(f, "channel_id").unwrap_or_default(),
        title: field_str(f, "title").unwrap_or_default(),
        description: field_str(f, "description").unwrap_or_default(),
        content_uri: field_str(f, "content_uri").unwrap_or_default(),
        start_time: field_u64(f, "start_time").unwrap_or(0),
        end_time: field_u64(f, "end_time").unwrap_or(0),
        proposer: field_str(f, "proposer").unwrap_or_default(),
        for_votes: field_u64(f, "for_votes").unwrap_or(0),
        against_votes: field_u64(f, "against_votes").unwrap_or(0),
        executed: field_bool(f, "executed").unwrap_or(false),
        passed: field_bool(f, "passed").unwrap_or(false),
    }
}

/// Map a `governance::ProposalCreated` event.
pub fn proposal_from_event(event: &ChainEvent, index: usize) -> Proposal {
    let empty = Map::new();
    let f = event.parsed_json.as_object().unwrap_or(&empty);
    let id = field_str(f, "proposal_id").unwrap_or_else(|| format!("proposal-{index}"));
    proposal_from_fields(id, f)
}

/// Map a `governance::Proposal` object.
pub fn proposal_from_object(obj: &ChainObject, index: usize) -> Proposal {
    let id = object_id(obj).unwrap_or_else(|| format!("proposal-{index}"));
    proposal_from_fields(id, &obj.fields)
}

/// `channel_id` carried by a `ProposalCreated` event, if any.
pub fn event_channel_id(event: &ChainEvent) -> Option<String> {
    event
        .parsed_json
        .as_object()
        .and_then(|f| field_str(f, "channel_id"))
}
