//! # Gateway Flows
//!
//! Drives every write and read of `ChainGateway` through the mock wallet,
//! reader and notifier.
//!
//! ## Properties Tested
//!
//! 1. A write without a connected wallet never reaches the wallet and emits
//!    exactly one error notification.
//! 2. Wallet-scoped reads are empty without a wallet.
//! 3. Missing on-chain fields fall back to fixed defaults.
//! 4. Each write emits exactly one notification, success or error.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Map, Value};

    use ks_01_chain_gateway::domain::{ChainEvent, ExecutionStatus};
    use ks_01_chain_gateway::{
        ChainGateway, ChainGatewayApi, ChainObject, EntryPoint, GatewayConfig, GatewayError,
        MockChainReader, MockWallet, NewChannel, NewProposal, NotificationLevel, ObjectId,
        RecordingNotifier, SuiAddress, TransactionBuilder, TransactionResponse, WalletError,
        MIST_PER_SUI, MOCK_ADDRESS,
    };

    type TestGateway = ChainGateway<MockWallet, MockChainReader, RecordingNotifier>;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Harness {
        gateway: TestGateway,
        wallet: Arc<MockWallet>,
        reader: Arc<MockChainReader>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(config: GatewayConfig, wallet: MockWallet, reader: MockChainReader) -> Harness {
        let wallet = Arc::new(wallet);
        let reader = Arc::new(reader);
        let notifier = Arc::new(RecordingNotifier::default());
        let gateway = ChainGateway::new(
            config,
            Arc::clone(&wallet),
            Arc::clone(&reader),
            Arc::clone(&notifier),
        );
        Harness {
            gateway,
            wallet,
            reader,
            notifier,
        }
    }

    fn connected() -> Harness {
        harness(
            GatewayConfig::for_testing(),
            MockWallet::connected(MOCK_ADDRESS),
            MockChainReader::default(),
        )
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn new_channel() -> NewChannel {
        NewChannel {
            name: "Physics Basics".into(),
            description: "Short lessons".into(),
            category: "Physics".into(),
            initial_shares: 1000,
            image_url: None,
        }
    }

    fn new_proposal() -> NewProposal {
        NewProposal {
            channel_id: "0xc".into(),
            title: "Series on entanglement".into(),
            description: "Five episodes".into(),
            content_uri: "ipfs://Qm".into(),
            voting_period_secs: 86_400,
        }
    }

    /// Run all nine writes in contract order, discarding payloads.
    async fn run_every_write(gateway: &TestGateway) -> Vec<Result<(), GatewayError>> {
        let share = ObjectId::new("0x5a");
        let listing = ObjectId::new("0x1157");
        let proposal = ObjectId::new("0x9a");
        vec![
            gateway.create_channel(new_channel()).await.map(|_| ()),
            gateway
                .transfer_shares(&share, &SuiAddress::new("0xb0b"))
                .await
                .map(|_| ()),
            gateway.split_shares(&share, 10).await.map(|_| ()),
            gateway.create_listing(&share, MIST_PER_SUI).await.map(|_| ()),
            gateway
                .purchase_shares(&listing, &ObjectId::new("0xc01"), 3)
                .await
                .map(|_| ()),
            gateway.cancel_listing(&listing).await.map(|_| ()),
            gateway.create_proposal(new_proposal()).await.map(|_| ()),
            gateway.cast_vote(&proposal, &share, true).await.map(|_| ()),
            gateway.execute_proposal(&proposal).await.map(|_| ()),
        ]
    }

    // =============================================================================
    // WRITES WITHOUT A WALLET
    // =============================================================================

    #[tokio::test]
    async fn test_every_write_without_wallet_is_rejected_once() {
        let h = harness(
            GatewayConfig::for_testing(),
            MockWallet::disconnected(),
            MockChainReader::default(),
        );

        let results = run_every_write(&h.gateway).await;

        assert_eq!(results.len(), EntryPoint::ALL.len());
        for result in &results {
            assert!(matches!(result, Err(GatewayError::WalletNotConnected)));
        }
        assert_eq!(h.wallet.submission_count(), 0);
        assert_eq!(
            h.notifier.errors(),
            vec!["Please connect your wallet first".to_string(); EntryPoint::ALL.len()]
        );
        assert!(h.notifier.successes().is_empty());
        assert!(!h.gateway.is_loading());
    }

    // =============================================================================
    // WRITES WITH A WALLET
    // =============================================================================

    #[tokio::test]
    async fn test_every_write_notifies_success_once() {
        let h = connected();

        let results = run_every_write(&h.gateway).await;

        assert!(results.iter().all(Result::is_ok));
        assert_eq!(h.wallet.submission_count(), EntryPoint::ALL.len());
        assert_eq!(h.notifier.notifications().len(), EntryPoint::ALL.len());
        assert!(h
            .notifier
            .notifications()
            .iter()
            .all(|n| n.level == NotificationLevel::Success));

        let targets: Vec<_> = h
            .wallet
            .submissions()
            .iter()
            .map(|r| r.call.entry_point)
            .collect();
        assert_eq!(targets, EntryPoint::ALL.to_vec());
        assert!(h
            .wallet
            .submissions()
            .iter()
            .all(|r| r.sender.as_str() == MOCK_ADDRESS));
    }

    #[tokio::test]
    async fn test_success_messages() {
        let h = connected();
        h.gateway.create_channel(new_channel()).await.unwrap();
        h.gateway
            .cast_vote(&ObjectId::new("0x9a"), &ObjectId::new("0x5a"), false)
            .await
            .unwrap();
        h.gateway
            .purchase_shares(&ObjectId::new("0x1"), &ObjectId::new("0x2"), 1)
            .await
            .unwrap();

        assert_eq!(
            h.notifier.successes(),
            vec![
                "Channel created successfully!".to_string(),
                "Vote cast successfully! You voted against the proposal.".to_string(),
                "Shares purchased successfully!".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_config_messages() {
        let cases = [
            (
                GatewayConfig {
                    package_id: String::new(),
                    ..GatewayConfig::for_testing()
                },
                "Contract addresses not configured",
            ),
            (
                GatewayConfig {
                    channel_registry_id: String::new(),
                    ..GatewayConfig::for_testing()
                },
                "Contract addresses not configured",
            ),
        ];
        for (config, message) in cases {
            let h = harness(
                config,
                MockWallet::connected(MOCK_ADDRESS),
                MockChainReader::default(),
            );
            let err = h.gateway.create_channel(new_channel()).await.unwrap_err();
            assert!(matches!(err, GatewayError::NotConfigured(_)));
            assert_eq!(h.notifier.errors(), vec![message.to_string()]);
            assert_eq!(h.wallet.submission_count(), 0);
        }

        let h = harness(
            GatewayConfig {
                marketplace_id: String::new(),
                governance_registry_id: String::new(),
                ..GatewayConfig::for_testing()
            },
            MockWallet::connected(MOCK_ADDRESS),
            MockChainReader::default(),
        );
        let _ = h
            .gateway
            .create_listing(&ObjectId::new("0x5a"), MIST_PER_SUI)
            .await;
        let _ = h.gateway.create_proposal(new_proposal()).await;
        assert_eq!(
            h.notifier.errors(),
            vec![
                "Marketplace not configured".to_string(),
                "Governance registry not configured".to_string(),
            ]
        );
        assert_eq!(h.wallet.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_rejection_and_abort_are_failures() {
        let h = connected();
        h.wallet.fail_with(WalletError::Rejected("declined".into()));

        let err = h
            .gateway
            .split_shares(&ObjectId::new("0x5a"), 4)
            .await
            .unwrap_err();
        assert!(!err.is_preflight());
        assert_eq!(
            h.notifier.errors(),
            vec!["Failed to split shares: User rejected the request: declined".to_string()]
        );

        let h = connected();
        let mut aborted = TransactionResponse::success("0xd1");
        aborted.status = ExecutionStatus::Failure("MoveAbort(3)".into());
        h.wallet.respond_with(aborted);

        let err = h
            .gateway
            .execute_proposal(&ObjectId::new("0x9a"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::TransactionFailed {
                action: "execute proposal",
                ..
            }
        ));
        assert_eq!(h.notifier.notifications().len(), 1);
        assert!(!h.gateway.is_loading());
    }

    #[tokio::test]
    async fn test_connect_then_write() {
        let h = harness(
            GatewayConfig::for_testing(),
            MockWallet::disconnected(),
            MockChainReader::default(),
        );
        assert!(!h.gateway.is_connected());

        let address = h.gateway.connect("Sui Wallet").await.unwrap();
        assert_eq!(address.as_str(), MOCK_ADDRESS);
        assert!(h
            .gateway
            .cancel_listing(&ObjectId::new("0x1157"))
            .await
            .is_ok());

        h.gateway.disconnect().await.unwrap();
        assert!(h.gateway.address().is_none());
        assert!(h
            .gateway
            .cancel_listing(&ObjectId::new("0x1157"))
            .await
            .is_err());
        assert_eq!(h.wallet.submission_count(), 1);
    }

    // =============================================================================
    // READS
    // =============================================================================

    #[tokio::test]
    async fn test_wallet_scoped_reads_empty_without_wallet() {
        let config = GatewayConfig::for_testing();
        let builder = TransactionBuilder::new(&config);
        let reader = MockChainReader::default()
            .with_objects(
                MOCK_ADDRESS,
                &builder.channel_type(),
                vec![ChainObject::new("0xc", Map::new())],
            )
            .with_objects(
                MOCK_ADDRESS,
                &builder.share_type(),
                vec![ChainObject::new("0x5a", Map::new())],
            )
            .with_balance(MOCK_ADDRESS, 7 * MIST_PER_SUI as u128);
        let h = harness(config, MockWallet::disconnected(), reader);

        assert!(h.gateway.owned_channels().await.is_empty());
        assert!(h.gateway.owned_shares().await.is_empty());
        assert_eq!(h.gateway.balance().await, 0);
        assert_eq!(h.reader.call_count(), 0);

        h.gateway.connect("Sui Wallet").await.unwrap();
        assert_eq!(h.gateway.owned_channels().await.len(), 1);
        assert_eq!(h.gateway.owned_shares().await.len(), 1);
        assert_eq!(h.gateway.balance().await, 7 * MIST_PER_SUI as u128);
    }

    #[tokio::test]
    async fn test_mapping_defaults_through_gateway() {
        let config = GatewayConfig::for_testing();
        let builder = TransactionBuilder::new(&config);
        let reader = MockChainReader::default()
            .with_objects(
                MOCK_ADDRESS,
                &builder.channel_type(),
                vec![
                    ChainObject::new("0xc0", Map::new()),
                    ChainObject::new(
                        "0xc1",
                        fields(json!({
                            "name": "Astro",
                            "total_shares": "500",
                            "user_shares": "25",
                            "category": "Space",
                        })),
                    ),
                ],
            )
            .with_objects(
                &config.marketplace_id,
                &builder.listing_type(),
                vec![ChainObject::default()],
            );
        let h = harness(config, MockWallet::connected(MOCK_ADDRESS), reader);

        let channels = h.gateway.owned_channels().await;
        assert_eq!(channels[0].name, "Channel #1");
        assert_eq!(channels[0].total_shares, 1000);
        assert_eq!(channels[0].user_shares, 100);
        assert_eq!(channels[0].category, "General");
        assert!(channels[0].active);
        assert_eq!(channels[1].name, "Astro");
        assert_eq!(channels[1].total_shares, 500);
        assert_eq!(channels[1].user_shares, 25);
        assert!((channels[1].voting_power() - 5.0).abs() < 1e-9);

        let listings = h.gateway.listings().await;
        assert_eq!(listings.len(), 1);
        let listing = &listings[0];
        assert_eq!(listing.id, "listing-0");
        assert_eq!(listing.channel_id, "1");
        assert_eq!(listing.channel_name, "Channel #1");
        assert_eq!(listing.amount, 100);
        assert_eq!(listing.price_per_share, MIST_PER_SUI);
        assert_eq!(listing.total_price, 100 * MIST_PER_SUI);
        assert!(listing.listed_at > 0);
    }

    #[tokio::test]
    async fn test_channel_proposals_newest_first() {
        let config = GatewayConfig::for_testing();
        let builder = TransactionBuilder::new(&config);
        let event = |id: &str, channel: &str| ChainEvent {
            event_type: builder.proposal_created_event(),
            parsed_json: json!({
                "proposal_id": id,
                "channel_id": channel,
                "title": format!("Proposal {id}"),
                "end_time": "1700000000",
            }),
            timestamp_ms: None,
            tx_digest: String::new(),
        };
        let reader = MockChainReader::default().with_events(
            &builder.proposal_created_event(),
            vec![event("0x1", "0xc"), event("0x2", "0xd"), event("0x3", "0xc")],
        );
        let h = harness(config, MockWallet::disconnected(), reader);

        let proposals = h.gateway.channel_proposals("0xc").await;
        let ids: Vec<_> = proposals.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["0x3", "0x1"]);
        assert_eq!(proposals[0].end_time, 1_700_000_000);
        assert!(h.gateway.channel_proposals("0xe").await.is_empty());
    }

    #[tokio::test]
    async fn test_reads_swallow_reader_failure() {
        let config = GatewayConfig::for_testing();
        let h = harness(
            config,
            MockWallet::connected(MOCK_ADDRESS),
            MockChainReader::default(),
        );
        h.reader.set_failing(true);

        assert!(h.gateway.owned_channels().await.is_empty());
        assert!(h.gateway.listings().await.is_empty());
        assert!(h.gateway.proposal_objects().await.is_empty());
        assert!(h.gateway.channel_proposals("0xc").await.is_empty());
        assert_eq!(h.gateway.balance().await, 0);
        assert!(h.notifier.notifications().is_empty());
    }
}
