//! Watch-only wallet session.

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::warn;

use crate::domain::{SuiAddress, TransactionRequest, TransactionResponse, WalletError};
use crate::ports::WalletPort;

/// [`WalletPort`] that observes an address without holding its key.
///
/// Reads scoped to the connected account work; `sign_and_execute` always
/// fails with [`WalletError::SigningUnavailable`]. Connecting by name takes
/// the name as the address to watch.
#[derive(Debug, Default)]
pub struct WatchOnlyWallet {
    account: RwLock<Option<SuiAddress>>,
}

impl WatchOnlyWallet {
    /// Session already watching `address`.
    pub fn watching(address: SuiAddress) -> Self {
        Self {
            account: RwLock::new(Some(address)),
        }
    }
}

#[async_trait]
impl WalletPort for WatchOnlyWallet {
    fn current_account(&self) -> Option<SuiAddress> {
        self.account.read().clone()
    }

    async fn connect(&self, wallet_name: &str) -> Result<SuiAddress, WalletError> {
        let address = SuiAddress::new(wallet_name.trim());
        if !address.is_well_formed() {
            return Err(WalletError::NotFound(wallet_name.to_string()));
        }
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
        warn!(
            "[ks-01] Watch-only session cannot sign {}",
            request.call.target
        );
        Err(WalletError::SigningUnavailable)
    }
}
