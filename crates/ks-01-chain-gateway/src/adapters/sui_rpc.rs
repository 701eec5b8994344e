//! Sui fullnode reader over JSON-RPC.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::rpc_types::{Balance, JsonRpcRequest, JsonRpcResponse, Page, SuiEvent, SuiObjectResponse};
use crate::config::GatewayConfig;
use crate::domain::{ChainEvent, ChainObject, RpcError, SuiAddress};
use crate::ports::ChainReader;

/// [`ChainReader`] backed by a Sui fullnode.
pub struct SuiRpcReader {
    client: Client,
    endpoint: String,
    page_limit: usize,
    max_pages: usize,
    request_id: AtomicU64,
}

impl SuiRpcReader {
    /// Reader for the fullnode named by `config`.
    pub fn new(config: &GatewayConfig) -> Result<Self, RpcError> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.rpc_endpoint(),
            page_limit: config.page_limit,
            max_pages: config.max_pages,
            request_id: AtomicU64::new(1),
        })
    }

    /// Fullnode URL in use.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Call a JSON-RPC method.
    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, RpcError> {
        let request = JsonRpcRequest::new(method, params, self.next_id());
        debug!("[ks-01] -> {} (id {})", method, request.id);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    RpcError::Connection(format!("Cannot connect to {}", self.endpoint))
                } else {
                    RpcError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Transport(format!("HTTP {status}")));
        }

        let rpc_response: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| RpcError::Parse(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        rpc_response
            .result
            .ok_or_else(|| RpcError::Parse("Missing result in response".to_string()))
    }

    /// Follow `nextCursor` until the last page or `max_pages`.
    async fn collect_pages<T, F>(&self, method: &str, params_for: F) -> Result<Vec<T>, RpcError>
    where
        T: DeserializeOwned,
        F: Fn(Value) -> Value,
    {
        let mut items = Vec::new();
        let mut cursor = Value::Null;

        for _ in 0..self.max_pages {
            let page: Page<T> = self.call(method, params_for(cursor)).await?;
            items.extend(page.data);
            match page.next_cursor {
                Some(next) if page.has_next_page && !next.is_null() => cursor = next,
                _ => return Ok(items),
            }
        }
        debug!("[ks-01] {} stopped after {} pages", method, self.max_pages);
        Ok(items)
    }
}

#[async_trait]
impl ChainReader for SuiRpcReader {
    async fn get_owned_objects(
        &self,
        owner: &str,
        struct_type: &str,
    ) -> Result<Vec<ChainObject>, RpcError> {
        let limit = self.page_limit;
        let responses: Vec<SuiObjectResponse> = self
            .collect_pages("suix_getOwnedObjects", |cursor| {
                json!([
                    owner,
                    {
                        "filter": { "StructType": struct_type },
                        "options": { "showType": true, "showContent": true }
                    },
                    cursor,
                    limit
                ])
            })
            .await?;

        Ok(responses
            .into_iter()
            .filter_map(|r| {
                if let (None, Some(err)) = (&r.data, &r.error) {
                    debug!("[ks-01] Skipping object entry: {}", err);
                }
                r.into_chain_object()
            })
            .collect())
    }

    async fn query_events(
        &self,
        event_type: &str,
        descending: bool,
    ) -> Result<Vec<ChainEvent>, RpcError> {
        let limit = self.page_limit;
        let events: Vec<SuiEvent> = self
            .collect_pages("suix_queryEvents", |cursor| {
                json!([{ "MoveEventType": event_type }, cursor, limit, descending])
            })
            .await?;
        Ok(events.into_iter().map(ChainEvent::from).collect())
    }

    async fn get_balance(&self, owner: &SuiAddress) -> Result<u128, RpcError> {
        let balance: Balance = self.call("suix_getBalance", json!([owner.as_str()])).await?;
        balance
            .total_balance
            .parse()
            .map_err(|_| RpcError::Parse(format!("Bad balance: {}", balance.total_balance)))
    }
}
