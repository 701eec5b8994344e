//! # KnowScroll Chain CLI
//!
//! Entry point wiring the chain gateway to a Sui fullnode.
//!
//! Reads go straight to the fullnode. Writes are printed as unsigned
//! transactions for an external wallet to sign; the watch-only account
//! given by `--address` is the sender.
//!
//! ## Environment
//!
//! - `KS_NETWORK`, `KS_RPC_URL`, `KS_PACKAGE_ID`, `KS_CHANNEL_REGISTRY`,
//!   `KS_MARKETPLACE`, `KS_GOVERNANCE_REGISTRY`: gateway configuration
//! - `KS_LOG_LEVEL`: tracing filter (default `info`)

mod commands;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ks_01_chain_gateway::{
    ChainGateway, GatewayConfig, Network, SuiAddress, SuiRpcReader, TracingNotifier,
    TransactionBuilder, WatchOnlyWallet,
};

use commands::{build_tx, run_read, Cli, Command};

/// Load configuration from the environment, then apply command-line overrides.
fn load_config(cli: &Cli) -> Result<GatewayConfig> {
    let mut config = GatewayConfig::from_env().context("Failed to read KS_* environment")?;

    if let Some(network) = &cli.network {
        config.network = network
            .parse::<Network>()
            .with_context(|| format!("Invalid --network {network}"))?;
    }
    if let Some(url) = &cli.rpc_url {
        config.rpc_url = url.clone();
    }

    config.validate().context("Invalid gateway configuration")?;
    Ok(config)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_env("KS_LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&cli)?;
    info!(
        "[ks] network={} rpc={}",
        config.network,
        config.rpc_endpoint()
    );

    let sender = cli.address.as_deref().map(SuiAddress::new);

    match &cli.command {
        Command::Config => print_json(&serde_json::to_value(&config)?),
        Command::Tx(intent) => {
            let request = build_tx(intent, &TransactionBuilder::new(&config), sender)?;
            debug!("[ks] Built {}", request.call.target);
            print_json(&serde_json::to_value(&request)?)
        }
        read => {
            let reader = SuiRpcReader::new(&config).context("Failed to build RPC client")?;
            let wallet = match sender {
                Some(address) => WatchOnlyWallet::watching(address),
                None => WatchOnlyWallet::default(),
            };
            let gateway = ChainGateway::new(
                config,
                Arc::new(wallet),
                Arc::new(reader),
                Arc::new(TracingNotifier),
            );
            let value = run_read(read, &gateway).await?;
            print_json(&value)
        }
    }
}
