//! Sui JSON-RPC wire types.

use crate::domain::{ChainEvent, ChainObject, ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON-RPC request structure
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<T> {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: T,
    pub id: u64,
}

impl<T> JsonRpcRequest<T> {
    pub fn new(method: impl Into<String>, params: T, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC response structure
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// One page of a cursor-paginated query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<Value>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// Entry of `suix_getOwnedObjects`.
#[derive(Debug, Deserialize)]
pub struct SuiObjectResponse {
    #[serde(default)]
    pub data: Option<SuiObjectData>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiObjectData {
    pub object_id: String,
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
    #[serde(default)]
    pub content: Option<SuiParsedContent>,
}

/// `content` of an object fetched with `showContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiParsedContent {
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
    #[serde(default)]
    pub fields: Option<Map<String, Value>>,
}

impl SuiObjectResponse {
    /// Flatten into a [`ChainObject`]. Entries carrying only an error map to `None`.
    pub fn into_chain_object(self) -> Option<ChainObject> {
        let data = self.data?;
        let (content_type, fields) = match data.content {
            Some(content) => (content.object_type, content.fields.unwrap_or_default()),
            None => (None, Map::new()),
        };
        Some(ChainObject {
            object_id: Some(ObjectId::new(data.object_id)),
            object_type: data.object_type.or(content_type),
            fields,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiEventId {
    pub tx_digest: String,
}

/// Entry of `suix_queryEvents`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiEvent {
    pub id: SuiEventId,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub parsed_json: Value,
    #[serde(default)]
    pub timestamp_ms: Option<String>,
}

impl From<SuiEvent> for ChainEvent {
    fn from(event: SuiEvent) -> Self {
        ChainEvent {
            event_type: event.event_type,
            parsed_json: event.parsed_json,
            timestamp_ms: event.timestamp_ms.and_then(|ts| ts.parse().ok()),
            tx_digest: event.id.tx_digest,
        }
    }
}

/// Result of `suix_getBalance`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub total_balance: String,
}
