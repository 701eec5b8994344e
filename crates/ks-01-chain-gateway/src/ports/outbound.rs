//! # Outbound Ports
//!
//! Traits for external dependencies: the wallet that signs, the fullnode that
//! answers reads, and the surface that shows notifications.

use crate::domain::{
    ChainEvent, ChainObject, Notification, NotificationLevel, RpcError, SuiAddress,
    TransactionRequest, TransactionResponse, WalletError,
};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Wallet session - outbound port.
///
/// Owns the connected account and the only signing primitive. Transaction
/// encoding and gas selection happen behind this trait.
#[async_trait]
pub trait WalletPort: Send + Sync {
    /// Currently connected account, if any.
    fn current_account(&self) -> Option<SuiAddress>;

    /// Connect the named wallet and return its account.
    async fn connect(&self, wallet_name: &str) -> Result<SuiAddress, WalletError>;

    /// Drop the current connection.
    async fn disconnect(&self) -> Result<(), WalletError>;

    /// Sign `request` with the connected account and execute it.
    async fn sign_and_execute(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionResponse, WalletError>;
}

/// Fullnode reads - outbound port.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Objects of `struct_type` owned by `owner` (an address or an object id).
    async fn get_owned_objects(
        &self,
        owner: &str,
        struct_type: &str,
    ) -> Result<Vec<ChainObject>, RpcError>;

    /// Events of `event_type`, newest first when `descending`.
    async fn query_events(
        &self,
        event_type: &str,
        descending: bool,
    ) -> Result<Vec<ChainEvent>, RpcError>;

    /// Total SUI balance of `owner` in MIST.
    async fn get_balance(&self, owner: &SuiAddress) -> Result<u128, RpcError>;
}

/// Transient user notifications - outbound port.
pub trait Notifier: Send + Sync {
    /// Show one notification.
    fn notify(&self, notification: Notification);
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Address the mock wallet connects as.
pub const MOCK_ADDRESS: &str =
    "0x00000000000000000000000000000000000000000000000000000000000a11ce";

/// Mock wallet for testing.
///
/// Records every submitted request so tests can assert whether the signing
/// primitive was reached.
pub struct MockWallet {
    account: RwLock<Option<SuiAddress>>,
    submissions: Mutex<Vec<TransactionRequest>>,
    failure: Mutex<Option<WalletError>>,
    response: Mutex<TransactionResponse>,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self {
            account: RwLock::new(None),
            submissions: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            response: Mutex::new(TransactionResponse::success("mock-digest")),
        }
    }
}

impl MockWallet {
    /// Wallet with no account connected.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Wallet already connected as `address`.
    pub fn connected(address: &str) -> Self {
        let wallet = Self::default();
        *wallet.account.write() = Some(SuiAddress::new(address));
        wallet
    }

    /// Make every subsequent `sign_and_execute` fail with `error`.
    pub fn fail_with(&self, error: WalletError) {
        *self.failure.lock() = Some(error);
    }

    /// Response returned by subsequent successful executions.
    pub fn respond_with(&self, response: TransactionResponse) {
        *self.response.lock() = response;
    }

    /// Requests that reached the signing primitive.
    pub fn submissions(&self) -> Vec<TransactionRequest> {
        self.submissions.lock().clone()
    }

    /// Number of requests that reached the signing primitive.
    pub fn submission_count(&self) -> usize {
        self.submissions.lock().len()
    }
}

#[async_trait]
impl WalletPort for MockWallet {
    fn current_account(&self) -> Option<SuiAddress> {
        self.account.read().clone()
    }

    async fn connect(&self, wallet_name: &str) -> Result<SuiAddress, WalletError> {
        if wallet_name.trim().is_empty() {
            return Err(WalletError::NotFound(wallet_name.to_string()));
        }
        let address = SuiAddress::new(MOCK_ADDRESS);
        *self.account.write() = Some(address.clone());
        Ok(address)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        *self.account.write() = None;
        Ok(())
    }

    async fn sign_and_execute(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionResponse, WalletError> {
        if self.account.read().is_none() {
            return Err(WalletError::NotConnected);
        }
        self.submissions.lock().push(request);

        if let Some(err) = self.failure.lock().clone() {
            return Err(err);
        }
        Ok(self.response.lock().clone())
    }
}

/// Mock fullnode for testing.
#[derive(Default)]
pub struct MockChainReader {
    objects: RwLock<HashMap<(String, String), Vec<ChainObject>>>,
    events: RwLock<HashMap<String, Vec<ChainEvent>>>,
    balances: RwLock<HashMap<String, u128>>,
    should_fail: AtomicBool,
    calls: AtomicUsize,
}

impl MockChainReader {
    /// Serve `objects` for `(owner, struct_type)`.
    pub fn with_objects(self, owner: &str, struct_type: &str, objects: Vec<ChainObject>) -> Self {
        self.objects
            .write()
            .insert((owner.to_string(), struct_type.to_string()), objects);
        self
    }

    /// Serve `events` (oldest first) for `event_type`.
    pub fn with_events(self, event_type: &str, events: Vec<ChainEvent>) -> Self {
        self.events.write().insert(event_type.to_string(), events);
        self
    }

    /// Serve `balance` for `owner`.
    pub fn with_balance(self, owner: &str, balance: u128) -> Self {
        self.balances.write().insert(owner.to_string(), balance);
        self
    }

    /// Toggle failure of every query.
    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    /// Number of queries received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<(), RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(RpcError::Connection("Mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainReader for MockChainReader {
    async fn get_owned_objects(
        &self,
        owner: &str,
        struct_type: &str,
    ) -> Result<Vec<ChainObject>, RpcError> {
        self.begin()?;
        Ok(self
            .objects
            .read()
            .get(&(owner.to_string(), struct_type.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn query_events(
        &self,
        event_type: &str,
        descending: bool,
    ) -> Result<Vec<ChainEvent>, RpcError> {
        self.begin()?;
        let mut events = self
            .events
            .read()
            .get(event_type)
            .cloned()
            .unwrap_or_default();
        if descending {
            events.reverse();
        }
        Ok(events)
    }

    async fn get_balance(&self, owner: &SuiAddress) -> Result<u128, RpcError> {
        self.begin()?;
        Ok(self
            .balances
            .read()
            .get(owner.as_str())
            .copied()
            .unwrap_or(0))
    }
}

/// Notifier that keeps everything it is shown.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// All notifications, in order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }

    /// Messages of error notifications.
    pub fn errors(&self) -> Vec<String> {
        self.messages(NotificationLevel::Error)
    }

    /// Messages of success notifications.
    pub fn successes(&self) -> Vec<String> {
        self.messages(NotificationLevel::Success)
    }

    fn messages(&self, level: NotificationLevel) -> Vec<String> {
        self.seen
            .lock()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}
