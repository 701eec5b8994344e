//! # View Flows
//!
//! Page-level flows from ks-02 running on top of the ks-01 gateway:
//! refresh-driven re-fetching, marketplace purchases, governance actions
//! and publishing a reel as a channel.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Map, Value};

    use ks_01_chain_gateway::domain::{CreatedObject, ObjectOwner};
    use ks_01_chain_gateway::{
        CallArg, ChainGateway, ChainGatewayApi, ChainObject, EntryPoint, GatewayConfig, Listing,
        MockChainReader, MockWallet, ObjectId, RecordingNotifier, SuiAddress, TransactionBuilder,
        TransactionResponse, WalletError, MIST_PER_SUI, MOCK_ADDRESS,
    };
    use ks_02_view_state::{
        clamp_purchase_amount, filter_listings, prepare_purchase, proposal_views, FormError,
        ListingForm, PendingAction, ProposalDraft, ProposalStatus, PublishFlow, PublishStep,
        RefreshCounter, VideoFile, ViewLoader, DEFAULT_MIN_VOTING_PERIOD_SECS,
        PUBLISH_SUCCESS_MESSAGE,
    };
    use proptest::prelude::*;

    type TestGateway = ChainGateway<MockWallet, MockChainReader, RecordingNotifier>;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn market_reader(config: &GatewayConfig) -> MockChainReader {
        let builder = TransactionBuilder::new(config);
        MockChainReader::default().with_objects(
            &config.marketplace_id,
            &builder.listing_type(),
            vec![
                ChainObject::new(
                    "0x11",
                    fields(json!({
                        "seller": "0xse11e5",
                        "channel_id": "0xc",
                        "amount": "10",
                        "price_per_share": "2000000000",
                    })),
                ),
                ChainObject::new(
                    "0x12",
                    fields(json!({ "seller": MOCK_ADDRESS, "channel_id": "0xd" })),
                ),
            ],
        )
    }

    fn gateway(
        wallet: MockWallet,
        reader: MockChainReader,
    ) -> (TestGateway, Arc<MockWallet>, Arc<MockChainReader>, Arc<RecordingNotifier>) {
        let wallet = Arc::new(wallet);
        let reader = Arc::new(reader);
        let notifier = Arc::new(RecordingNotifier::default());
        let gateway = ChainGateway::new(
            GatewayConfig::for_testing(),
            Arc::clone(&wallet),
            Arc::clone(&reader),
            Arc::clone(&notifier),
        );
        (gateway, wallet, reader, notifier)
    }

    fn video() -> VideoFile {
        VideoFile {
            name: "entanglement.mp4".into(),
            mime_type: "video/mp4".into(),
            preview_url: "blob:http://localhost/abc".into(),
        }
    }

    fn flow_at_preview() -> PublishFlow {
        let mut flow = PublishFlow::new();
        flow.select_file(true, video()).unwrap();
        flow.advance_upload(100.0).unwrap();
        flow.advance_processing(100.0).unwrap();
        flow.metadata.title = "Entanglement in 60s".into();
        flow.metadata.description = "Spooky action".into();
        flow.metadata.category = "Physics".into();
        flow.submit_metadata().unwrap();
        flow
    }

    // =============================================================================
    // REFRESH
    // =============================================================================

    #[tokio::test]
    async fn test_refresh_triggers_exactly_one_refetch() {
        let config = GatewayConfig::for_testing();
        let (gateway, _wallet, reader, _notifier) =
            gateway(MockWallet::connected(MOCK_ADDRESS), market_reader(&config));
        let mut counter = RefreshCounter::new();
        let mut loader: ViewLoader<(), Vec<Listing>> = ViewLoader::new("listings");

        loader.sync(counter, (), |_| gateway.listings()).await;
        loader.sync(counter, (), |_| gateway.listings()).await;
        assert_eq!(loader.fetch_count(), 1);
        assert_eq!(reader.call_count(), 1);
        assert_eq!(loader.data().len(), 2);

        // A successful write bumps the counter.
        gateway
            .cancel_listing(&ObjectId::new("0x12"))
            .await
            .unwrap();
        counter.bump();

        loader.sync(counter, (), |_| gateway.listings()).await;
        loader.sync(counter, (), |_| gateway.listings()).await;
        assert_eq!(loader.fetch_count(), 2);
        assert_eq!(reader.call_count(), 2);
    }

    #[tokio::test]
    async fn test_selection_change_refetches_once() {
        let config = GatewayConfig::for_testing();
        let (gateway, _wallet, reader, _notifier) =
            gateway(MockWallet::connected(MOCK_ADDRESS), market_reader(&config));
        let counter = RefreshCounter::new();
        let mut loader: ViewLoader<Option<String>, Vec<Listing>> = ViewLoader::new("listings");

        let fetch = |selected: Option<String>| {
            let gateway = &gateway;
            async move { filter_listings(&gateway.listings().await, selected.as_deref()) }
        };

        assert_eq!(loader.sync(counter, None, fetch).await.len(), 2);
        assert_eq!(
            loader.sync(counter, Some("0xc".into()), fetch).await.len(),
            1
        );
        loader.sync(counter, Some("0xc".into()), fetch).await;
        assert_eq!(reader.call_count(), 2);
    }

    // =============================================================================
    // MARKETPLACE
    // =============================================================================

    #[tokio::test]
    async fn test_purchase_is_clamped_before_dispatch() {
        let config = GatewayConfig::for_testing();
        let (gateway, wallet, _reader, notifier) =
            gateway(MockWallet::connected(MOCK_ADDRESS), market_reader(&config));

        let listings = gateway.listings().await;
        let listing = listings.iter().find(|l| l.id == "0x11").unwrap();
        let buyer = gateway.address().map(|a| a.to_string());

        let quote = prepare_purchase(listing, buyer.as_deref(), "50").unwrap();
        assert_eq!(quote.amount, 10);
        assert_eq!(quote.total_sui(), "20.0000");

        gateway
            .purchase_shares(
                &ObjectId::new(quote.listing_id.as_str()),
                &ObjectId::new("0xc01"),
                quote.amount,
            )
            .await
            .unwrap();

        let submitted = wallet.submissions();
        assert_eq!(submitted[0].call.entry_point, EntryPoint::PurchaseShares);
        assert_eq!(submitted[0].call.arguments[3], CallArg::U64(10));
        assert_eq!(
            notifier.successes(),
            vec!["Shares purchased successfully!".to_string()]
        );

        let own = listings.iter().find(|l| l.id == "0x12").unwrap();
        assert_eq!(
            prepare_purchase(own, buyer.as_deref(), "1"),
            Err(FormError::OwnListing)
        );
    }

    #[tokio::test]
    async fn test_listing_form_to_gateway() {
        let (gateway, wallet, _reader, _notifier) =
            gateway(MockWallet::connected(MOCK_ADDRESS), MockChainReader::default());
        let mut form = ListingForm {
            price_sui: "0.25".into(),
            amount: "40".into(),
        };

        let draft = form.validate().unwrap();
        gateway
            .create_listing(&ObjectId::new("0x5a"), draft.price_per_share)
            .await
            .unwrap();
        form.clear();

        assert_eq!(
            wallet.submissions()[0].call.arguments[2],
            CallArg::U64(MIST_PER_SUI / 4)
        );
        assert!(form.price_sui.is_empty());
    }

    proptest! {
        #[test]
        fn prop_clamp_stays_in_listing_range(raw in "-?[0-9]{0,8}[a-z]{0,2}", listed in 1u64..500) {
            let amount = clamp_purchase_amount(&raw, listed);
            prop_assert!((1..=listed).contains(&amount));
        }
    }

    // =============================================================================
    // GOVERNANCE
    // =============================================================================

    #[tokio::test]
    async fn test_create_then_vote_with_pending_marker() {
        let (gateway, wallet, _reader, notifier) =
            gateway(MockWallet::connected(MOCK_ADDRESS), MockChainReader::default());

        let draft = ProposalDraft {
            title: "Series on decoherence".into(),
            description: "Four episodes".into(),
            content_uri: "https://example.org/outline".into(),
            ..Default::default()
        };
        let proposal = draft
            .validate("0xc", DEFAULT_MIN_VOTING_PERIOD_SECS)
            .unwrap();
        gateway.create_proposal(proposal).await.unwrap();

        let mut pending = PendingAction::default();
        pending.begin("0x9a");
        assert!(pending.is_busy("0x9a"));
        gateway
            .cast_vote(&ObjectId::new("0x9a"), &ObjectId::new("0x5a"), true)
            .await
            .unwrap();
        pending.finish();
        assert!(!pending.is_busy("0x9a"));

        assert_eq!(wallet.submission_count(), 2);
        assert_eq!(
            notifier.successes()[1],
            "Vote cast successfully! You voted for the proposal."
        );
    }

    #[tokio::test]
    async fn test_registry_proposals_to_views() {
        let config = GatewayConfig::for_testing();
        let builder = TransactionBuilder::new(&config);
        let reader = MockChainReader::default().with_objects(
            &config.governance_registry_id,
            &builder.proposal_type(),
            vec![
                ChainObject::new(
                    "0xa",
                    fields(json!({ "channel_id": "0xc", "end_time": "100", "executed": true, "passed": true })),
                ),
                ChainObject::new(
                    "0xb",
                    fields(json!({ "channel_id": "0xc", "end_time": "5000", "for_votes": "3", "against_votes": "1" })),
                ),
            ],
        );
        let (gateway, _wallet, _reader, _notifier) = gateway(MockWallet::disconnected(), reader);

        let views = proposal_views(gateway.proposal_objects().await, 1_000);
        assert_eq!(views[0].proposal.id, "0xb");
        assert_eq!(views[0].status, ProposalStatus::Active);
        assert!((views[0].for_percentage - 75.0).abs() < 1e-9);
        assert_eq!(views[1].label(), "Passed");
    }

    // =============================================================================
    // PUBLISH
    // =============================================================================

    #[tokio::test]
    async fn test_publish_creates_channel() {
        let (gateway, wallet, _reader, notifier) =
            gateway(MockWallet::connected(MOCK_ADDRESS), MockChainReader::default());
        let mut response = TransactionResponse::success("0xd16e57");
        response.created = vec![CreatedObject {
            object_id: ObjectId::new("0xc4a"),
            owner: ObjectOwner::AddressOwner(SuiAddress::new(MOCK_ADDRESS)),
        }];
        wallet.respond_with(response);

        let mut flow = flow_at_preview();
        let created = flow.publish(&gateway).await.unwrap();

        assert_eq!(flow.step(), PublishStep::Complete);
        assert_eq!(created.channel_id, Some(ObjectId::new("0xc4a")));
        assert_eq!(flow.channel_id(), Some(&ObjectId::new("0xc4a")));
        assert_eq!(flow.notice(), Some(PUBLISH_SUCCESS_MESSAGE));

        let call = &wallet.submissions()[0].call;
        assert_eq!(call.entry_point, EntryPoint::CreateChannel);
        assert_eq!(call.arguments[1], CallArg::String("Entanglement in 60s".into()));
        assert_eq!(call.arguments[4], CallArg::U64(1000));
        assert_eq!(
            call.arguments[5],
            CallArg::OptionBytes(Some(b"blob:http://localhost/abc".to_vec()))
        );
        assert_eq!(
            notifier.successes(),
            vec!["Channel created successfully!".to_string()]
        );
    }

    #[tokio::test]
    async fn test_publish_failure_returns_to_preview() {
        let (gateway, wallet, _reader, notifier) =
            gateway(MockWallet::connected(MOCK_ADDRESS), MockChainReader::default());
        wallet.fail_with(WalletError::Rejected("closed popup".into()));

        let mut flow = flow_at_preview();
        assert_eq!(
            flow.publish(&gateway).await,
            Err(FormError::PublishFailed)
        );
        assert_eq!(flow.step(), PublishStep::Preview);
        assert!(flow.channel_id().is_none());
        assert!(flow.notice().is_none());
        assert_eq!(notifier.errors().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_requires_wallet() {
        let (gateway, wallet, _reader, notifier) =
            gateway(MockWallet::disconnected(), MockChainReader::default());

        let mut flow = flow_at_preview();
        assert_eq!(
            flow.publish(&gateway).await,
            Err(FormError::WalletNotConnected)
        );
        assert_eq!(flow.step(), PublishStep::Preview);
        assert_eq!(wallet.submission_count(), 0);
        assert!(notifier.notifications().is_empty());
    }
}
