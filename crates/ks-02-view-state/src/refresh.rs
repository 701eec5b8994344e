//! # Refresh Tracking
//!
//! Pages hold no cache of chain state. After a mutating action they bump a
//! counter, and every read that depends on it fetches again the next time
//! the page syncs. A fetch runs once per distinct `(counter, key)` pair; an
//! unchanged pair never refetches.

use std::future::Future;
use tracing::debug;

/// Monotonic counter bumped after each mutating action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshCounter(u64);

impl RefreshCounter {
    /// Fresh counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a re-fetch of every dependent read.
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// Current value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Remembers which `(counter, key)` a read last ran for.
#[derive(Clone, Debug)]
pub struct Refetch<K> {
    last: Option<(u64, K)>,
}

impl<K> Default for Refetch<K> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<K: PartialEq + Clone> Refetch<K> {
    /// Returns `true` exactly once for each new `(counter, key)` pair.
    pub fn should_fetch(&mut self, counter: RefreshCounter, key: &K) -> bool {
        let current = (counter.value(), key.clone());
        if self.last.as_ref() == Some(&current) {
            return false;
        }
        self.last = Some(current);
        true
    }

    /// Forget the last pair so the next sync fetches.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

/// One page-level read with its last result.
#[derive(Debug)]
pub struct ViewLoader<K, T> {
    name: &'static str,
    refetch: Refetch<K>,
    data: T,
    fetches: usize,
}

impl<K: PartialEq + Clone, T: Default> ViewLoader<K, T> {
    /// Loader named `name` (for logs) holding `T::default()` until first sync.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            refetch: Refetch::default(),
            data: T::default(),
            fetches: 0,
        }
    }

    /// Run `fetch` if `(counter, key)` changed since the last sync, then
    /// return the held data.
    pub async fn sync<F, Fut>(&mut self, counter: RefreshCounter, key: K, fetch: F) -> &T
    where
        F: FnOnce(K) -> Fut,
        Fut: Future<Output = T>,
    {
        if self.refetch.should_fetch(counter, &key) {
            debug!("[ks-02] Fetching {} (refresh {})", self.name, counter.value());
            self.data = fetch(key).await;
            self.fetches += 1;
        }
        &self.data
    }

    /// Last fetched data.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Number of fetches performed.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }
}
