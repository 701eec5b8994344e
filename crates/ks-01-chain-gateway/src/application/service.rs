//! # Chain Gateway Service
//!
//! Application service tying the transaction builder, the wallet, the
//! fullnode reader and the notifier together.
//!
//! Every write runs the same pipeline:
//!
//! 1. require a connected account
//! 2. build the Move call (checks configured ids)
//! 3. sign and execute through the wallet
//! 4. treat an on-chain abort as a failed transaction
//! 5. emit exactly one notification
//!
//! Steps 1 and 2 fail before the wallet is touched.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::tx_builder::TransactionBuilder;
use crate::config::GatewayConfig;
use crate::domain::{
    channel_from_object, event_channel_id, listing_from_object, now_ms, proposal_from_event,
    proposal_from_object, share_from_object, vote_success_message, AccountInfo, Channel,
    ChainObject, CreatedChannel, EntryPoint, ExecutionStatus, GatewayError, Listing, Mist, MoveCall,
    NewChannel, NewProposal, Notification, ObjectId, Proposal, ShareHolding, SuiAddress,
    TransactionRequest, TransactionResponse, WalletError,
};
use crate::ports::{ChainGatewayApi, ChainReader, Notifier, WalletPort};

/// Decrements the in-flight counter when a write finishes, however it ends.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Chain Gateway - maps intents to transactions and chain reads to records.
pub struct ChainGateway<W: WalletPort, R: ChainReader, N: Notifier> {
    /// Configuration.
    config: GatewayConfig,
    /// Move call construction.
    builder: TransactionBuilder,
    /// Wallet session.
    wallet: Arc<W>,
    /// Fullnode reads.
    reader: Arc<R>,
    /// User notifications.
    notifier: Arc<N>,
    /// Writes awaiting execution.
    in_flight: AtomicUsize,
}

impl<W: WalletPort, R: ChainReader, N: Notifier> ChainGateway<W, R, N> {
    /// Create a new gateway.
    pub fn new(config: GatewayConfig, wallet: Arc<W>, reader: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            builder: TransactionBuilder::new(&config),
            config,
            wallet,
            reader,
            notifier,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Move call builder over the configured ids.
    pub fn builder(&self) -> &TransactionBuilder {
        &self.builder
    }

    /// Run one write and report its outcome.
    async fn submit<F>(
        &self,
        entry_point: EntryPoint,
        success: String,
        build: F,
    ) -> Result<TransactionResponse, GatewayError>
    where
        F: FnOnce(&TransactionBuilder) -> Result<MoveCall, GatewayError> + Send,
    {
        match self.try_submit(entry_point, build).await {
            Ok(response) => {
                info!("[ks-01] {} succeeded: digest {}", entry_point, response.digest);
                self.notifier.notify(Notification::success(success));
                Ok(response)
            }
            Err(e) => {
                error!("[ks-01] {} failed: {}", entry_point, e);
                self.notifier.notify(Notification::error(e.notification()));
                Err(e)
            }
        }
    }

    async fn try_submit<F>(
        &self,
        entry_point: EntryPoint,
        build: F,
    ) -> Result<TransactionResponse, GatewayError>
    where
        F: FnOnce(&TransactionBuilder) -> Result<MoveCall, GatewayError> + Send,
    {
        let sender = self
            .wallet
            .current_account()
            .ok_or(GatewayError::WalletNotConnected)?;
        let call = build(&self.builder)?;

        debug!(
            "[ks-01] Submitting {} ({} args) from {}",
            call.target,
            call.arguments.len(),
            sender.short()
        );

        let _guard = InFlight::enter(&self.in_flight);
        let response = self
            .wallet
            .sign_and_execute(TransactionRequest::new(sender, call))
            .await
            .map_err(|e| GatewayError::TransactionFailed {
                action: entry_point.action(),
                reason: e.to_string(),
            })?;

        if let ExecutionStatus::Failure(reason) = &response.status {
            return Err(GatewayError::TransactionFailed {
                action: entry_point.action(),
                reason: reason.clone(),
            });
        }
        Ok(response)
    }

    /// Objects of `struct_type` owned by `owner`; empty on failure.
    async fn fetch_objects(&self, what: &str, owner: &str, struct_type: String) -> Vec<ChainObject> {
        if !self.builder.has_package() {
            warn!("[ks-01] Package id not configured, skipping {} query", what);
            return Vec::new();
        }
        if owner.is_empty() {
            warn!("[ks-01] No owner for {} query", what);
            return Vec::new();
        }
        match self.reader.get_owned_objects(owner, &struct_type).await {
            Ok(objects) => {
                debug!("[ks-01] Fetched {} {} objects", objects.len(), what);
                objects
            }
            Err(e) => {
                error!("[ks-01] Error fetching {}: {}", what, e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl<W, R, N> ChainGatewayApi for ChainGateway<W, R, N>
where
    W: WalletPort + 'static,
    R: ChainReader + 'static,
    N: Notifier + 'static,
{
    async fn connect(&self, wallet_name: &str) -> Result<SuiAddress, WalletError> {
        let address = self.wallet.connect(wallet_name).await?;
        info!("[ks-01] Connected {} as {}", wallet_name, address.short());
        Ok(address)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.wallet.disconnect().await?;
        info!("[ks-01] Wallet disconnected");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.wallet.current_account().is_some()
    }

    fn address(&self) -> Option<SuiAddress> {
        self.wallet.current_account()
    }

    fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    fn explorer_url(&self) -> Option<String> {
        self.wallet
            .current_account()
            .map(|a| self.config.explorer_account_url(a.as_str()))
    }

    async fn create_channel(&self, channel: NewChannel) -> Result<CreatedChannel, GatewayError> {
        let ep = EntryPoint::CreateChannel;
        let response = self
            .submit(ep, ep.success_message().to_string(), |b| {
                b.create_channel(&channel)
            })
            .await?;
        let channel_id = response.first_address_owned().cloned();
        if let Some(id) = &channel_id {
            info!("[ks-01] New channel {}", id);
        }
        Ok(CreatedChannel {
            response,
            channel_id,
        })
    }

    async fn transfer_shares(
        &self,
        share_id: &ObjectId,
        recipient: &SuiAddress,
    ) -> Result<TransactionResponse, GatewayError> {
        let ep = EntryPoint::TransferShares;
        self.submit(ep, ep.success_message().to_string(), |b| {
            b.transfer_shares(share_id, recipient)
        })
        .await
    }

    async fn split_shares(
        &self,
        share_id: &ObjectId,
        amount: u64,
    ) -> Result<TransactionResponse, GatewayError> {
        let ep = EntryPoint::SplitShares;
        self.submit(ep, ep.success_message().to_string(), |b| {
            b.split_shares(share_id, amount)
        })
        .await
    }

    async fn create_listing(
        &self,
        share_id: &ObjectId,
        price_per_share: Mist,
    ) -> Result<TransactionResponse, GatewayError> {
        let ep = EntryPoint::CreateListing;
        self.submit(ep, ep.success_message().to_string(), |b| {
            b.create_listing(share_id, price_per_share)
        })
        .await
    }

    async fn purchase_shares(
        &self,
        listing_id: &ObjectId,
        payment_coin: &ObjectId,
        amount: u64,
    ) -> Result<TransactionResponse, GatewayError> {
        let ep = EntryPoint::PurchaseShares;
        self.submit(ep, ep.success_message().to_string(), |b| {
            b.purchase_shares(listing_id, payment_coin, amount)
        })
        .await
    }

    async fn cancel_listing(
        &self,
        listing_id: &ObjectId,
    ) -> Result<TransactionResponse, GatewayError> {
        let ep = EntryPoint::CancelListing;
        self.submit(ep, ep.success_message().to_string(), |b| {
            b.cancel_listing(listing_id)
        })
        .await
    }

    async fn create_proposal(
        &self,
        proposal: NewProposal,
    ) -> Result<TransactionResponse, GatewayError> {
        let ep = EntryPoint::CreateProposal;
        self.submit(ep, ep.success_message().to_string(), |b| {
            b.create_proposal(&proposal)
        })
        .await
    }

    async fn cast_vote(
        &self,
        proposal_id: &ObjectId,
        share_id: &ObjectId,
        support: bool,
    ) -> Result<TransactionResponse, GatewayError> {
        self.submit(EntryPoint::CastVote, vote_success_message(support), |b| {
            b.cast_vote(proposal_id, share_id, support)
        })
        .await
    }

    async fn execute_proposal(
        &self,
        proposal_id: &ObjectId,
    ) -> Result<TransactionResponse, GatewayError> {
        let ep = EntryPoint::ExecuteProposal;
        self.submit(ep, ep.success_message().to_string(), |b| {
            b.execute_proposal(proposal_id)
        })
        .await
    }

    async fn owned_channels(&self) -> Vec<Channel> {
        let Some(owner) = self.wallet.current_account() else {
            return Vec::new();
        };
        let objects = self
            .fetch_objects("channels", owner.as_str(), self.builder.channel_type())
            .await;
        objects
            .iter()
            .enumerate()
            .map(|(i, obj)| channel_from_object(obj, i))
            .collect()
    }

    async fn owned_shares(&self) -> Vec<ShareHolding> {
        let Some(owner) = self.wallet.current_account() else {
            return Vec::new();
        };
        let objects = self
            .fetch_objects("shares", owner.as_str(), self.builder.share_type())
            .await;
        objects
            .iter()
            .enumerate()
            .map(|(i, obj)| share_from_object(obj, i, owner.as_str()))
            .collect()
    }

    async fn listings(&self) -> Vec<Listing> {
        let now = now_ms();
        let objects = self
            .fetch_objects(
                "listings",
                self.builder.marketplace_id(),
                self.builder.listing_type(),
            )
            .await;
        objects
            .iter()
            .enumerate()
            .map(|(i, obj)| listing_from_object(obj, i, now))
            .collect()
    }

    async fn channel_proposals(&self, channel_id: &str) -> Vec<Proposal> {
        if !self.builder.has_package() {
            warn!("[ks-01] Package id not configured, skipping proposal query");
            return Vec::new();
        }
        let events = match self
            .reader
            .query_events(&self.builder.proposal_created_event(), true)
            .await
        {
            Ok(events) => events,
            Err(e) => {
                error!("[ks-01] Error fetching proposals for {}: {}", channel_id, e);
                return Vec::new();
            }
        };
        events
            .iter()
            .filter(|event| event_channel_id(event).as_deref() == Some(channel_id))
            .enumerate()
            .map(|(i, event)| proposal_from_event(event, i))
            .collect()
    }

    async fn proposal_objects(&self) -> Vec<Proposal> {
        let objects = self
            .fetch_objects(
                "proposals",
                self.builder.governance_registry_id(),
                self.builder.proposal_type(),
            )
            .await;
        objects
            .iter()
            .enumerate()
            .map(|(i, obj)| proposal_from_object(obj, i))
            .collect()
    }

    async fn balance(&self) -> u128 {
        let Some(owner) = self.wallet.current_account() else {
            return 0;
        };
        match self.reader.get_balance(&owner).await {
            Ok(balance) => balance,
            Err(e) => {
                error!("[ks-01] Error fetching balance: {}", e);
                0
            }
        }
    }

    async fn account(&self) -> Option<AccountInfo> {
        let address = self.wallet.current_account()?;
        let balance = self.balance().await;
        Some(AccountInfo { address, balance })
    }
}
