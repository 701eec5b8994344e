//! Command-line surface and command execution.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};

use ks_01_chain_gateway::domain::{now_ms, now_secs};
use ks_01_chain_gateway::{
    ChainGatewayApi, GatewayError, NewChannel, ObjectId, SuiAddress, TransactionBuilder,
    TransactionRequest, DEFAULT_INITIAL_SHARES,
};
use ks_02_view_state::{
    filter_listings, format_sui, format_sui_balance, proposal_views, sui_to_mist, time_ago,
    MarketStats, ProposalDraft, ProposalStats, DEFAULT_MIN_VOTING_PERIOD_SECS,
    DEFAULT_VOTING_PERIOD_SECS,
};

/// KnowScroll chain gateway CLI
#[derive(Parser, Debug)]
#[command(name = "ks")]
#[command(about = "Query KnowScroll channels, shares, listings and proposals on Sui")]
pub struct Cli {
    /// Sui network (localnet, devnet, testnet, mainnet)
    #[arg(short, long, global = true)]
    pub network: Option<String>,

    /// Fullnode JSON-RPC URL, overrides the network default
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Account to act as (watch-only; signing stays with an external wallet)
    #[arg(short, long, global = true)]
    pub address: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Channels owned by --address
    Channels,
    /// Share objects owned by --address
    Shares,
    /// Marketplace listings with market stats
    Listings {
        /// Only listings for this channel
        #[arg(long)]
        channel: Option<String>,
    },
    /// Proposals for a channel, ordered by status
    Proposals {
        /// Channel object id
        channel_id: String,
        /// Read proposal objects held by the governance registry instead of events
        #[arg(long)]
        registry: bool,
    },
    /// SUI balance of --address
    Balance,
    /// Effective configuration
    Config,
    /// Print the unsigned transaction for one intent
    #[command(subcommand)]
    Tx(TxIntent),
}

/// Write intents.
#[derive(Subcommand, Debug)]
pub enum TxIntent {
    /// channel_nft::create_channel
    CreateChannel(CreateChannelArgs),
    /// channel_nft::transfer_shares
    TransferShares {
        /// Share object id
        share: String,
        /// Recipient address
        recipient: String,
    },
    /// channel_nft::split_shares
    SplitShares {
        /// Share object id
        share: String,
        /// Shares to split off
        amount: u64,
    },
    /// marketplace::create_listing
    CreateListing {
        /// Share object id
        share: String,
        /// Price per share in SUI
        #[arg(long)]
        price: String,
    },
    /// marketplace::purchase_shares
    PurchaseShares {
        /// Listing object id
        listing: String,
        /// SUI coin object paying for the shares
        coin: String,
        /// Shares to buy
        amount: u64,
    },
    /// marketplace::cancel_listing
    CancelListing {
        /// Listing object id
        listing: String,
    },
    /// governance::create_proposal
    CreateProposal(CreateProposalArgs),
    /// governance::cast_vote
    CastVote {
        /// Proposal object id
        proposal: String,
        /// Share object id carrying the voting weight
        share: String,
        /// Vote against instead of for
        #[arg(long)]
        against: bool,
    },
    /// governance::execute_proposal
    ExecuteProposal {
        /// Proposal object id
        proposal: String,
    },
}

/// Arguments of `tx create-channel`.
#[derive(Args, Debug)]
pub struct CreateChannelArgs {
    /// Channel name
    #[arg(long)]
    pub name: String,
    /// Channel description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Content category
    #[arg(long, default_value = "General")]
    pub category: String,
    /// Shares minted to the creator
    #[arg(long, default_value_t = DEFAULT_INITIAL_SHARES)]
    pub shares: u64,
    /// Cover image URL
    #[arg(long)]
    pub image_url: Option<String>,
}

/// Arguments of `tx create-proposal`.
#[derive(Args, Debug)]
pub struct CreateProposalArgs {
    /// Channel the proposal governs
    pub channel_id: String,
    /// Title
    #[arg(long)]
    pub title: String,
    /// Description
    #[arg(long)]
    pub description: String,
    /// Content reference (ipfs:// or https://)
    #[arg(long)]
    pub content_uri: String,
    /// Voting window in seconds
    #[arg(long, default_value_t = DEFAULT_VOTING_PERIOD_SECS)]
    pub voting_period: u64,
}

#[derive(Serialize)]
struct BalanceReport {
    address: Option<String>,
    balance_mist: String,
    balance_sui: String,
    explorer_url: Option<String>,
}

/// Run a read command against `gateway`.
pub async fn run_read<G: ChainGatewayApi + ?Sized>(command: &Command, gateway: &G) -> Result<Value> {
    let value = match command {
        Command::Channels => {
            let channels = gateway.owned_channels().await;
            let rows: Vec<Value> = channels
                .iter()
                .map(|c| {
                    json!({
                        "channel": c,
                        "voting_power": format!("{:.2}%", c.voting_power()),
                    })
                })
                .collect();
            Value::Array(rows)
        }
        Command::Shares => serde_json::to_value(gateway.owned_shares().await)?,
        Command::Listings { channel } => {
            let all = gateway.listings().await;
            let now = now_ms();
            let shown: Vec<Value> = filter_listings(&all, channel.as_deref())
                .iter()
                .map(|l| {
                    json!({
                        "listing": l,
                        "price_per_share_sui": format_sui(l.price_per_share),
                        "listed": time_ago(l.listed_at, now),
                    })
                })
                .collect();
            json!({
                "stats": MarketStats::from_listings(&all),
                "listings": shown,
            })
        }
        Command::Proposals {
            channel_id,
            registry,
        } => {
            let proposals = if *registry {
                gateway
                    .proposal_objects()
                    .await
                    .into_iter()
                    .filter(|p| &p.channel_id == channel_id)
                    .collect()
            } else {
                gateway.channel_proposals(channel_id).await
            };
            let views = proposal_views(proposals, now_secs());
            let labelled: Vec<Value> = views
                .iter()
                .map(|v| json!({ "proposal": v, "label": v.label() }))
                .collect();
            json!({
                "stats": ProposalStats::from_views(&views),
                "proposals": labelled,
            })
        }
        Command::Balance => {
            let account = gateway.account().await;
            let balance = account.as_ref().map_or(0, |a| a.balance);
            serde_json::to_value(BalanceReport {
                address: account.map(|a| a.address.to_string()),
                balance_mist: balance.to_string(),
                balance_sui: format_sui_balance(balance),
                explorer_url: gateway.explorer_url(),
            })?
        }
        Command::Config | Command::Tx(_) => bail!("not a read command"),
    };
    Ok(value)
}

/// Build the unsigned transaction for `intent`, sent from `sender`.
///
/// Fails the same way a gateway write does before submission: no sender,
/// or an id the intent needs is not configured.
pub fn build_tx(
    intent: &TxIntent,
    builder: &TransactionBuilder,
    sender: Option<SuiAddress>,
) -> Result<TransactionRequest> {
    let sender = sender.ok_or(GatewayError::WalletNotConnected).map_err(notify)?;

    let call = match intent {
        TxIntent::CreateChannel(args) => builder.create_channel(&NewChannel {
            name: args.name.clone(),
            description: args.description.clone(),
            category: args.category.clone(),
            initial_shares: args.shares,
            image_url: args.image_url.clone(),
        }),
        TxIntent::TransferShares { share, recipient } => builder.transfer_shares(
            &ObjectId::new(share.as_str()),
            &SuiAddress::new(recipient.as_str()),
        ),
        TxIntent::SplitShares { share, amount } => {
            builder.split_shares(&ObjectId::new(share.as_str()), *amount)
        }
        TxIntent::CreateListing { share, price } => {
            let price_per_share = sui_to_mist(price).context("price per share")?;
            builder.create_listing(&ObjectId::new(share.as_str()), price_per_share)
        }
        TxIntent::PurchaseShares {
            listing,
            coin,
            amount,
        } => builder.purchase_shares(
            &ObjectId::new(listing.as_str()),
            &ObjectId::new(coin.as_str()),
            *amount,
        ),
        TxIntent::CancelListing { listing } => {
            builder.cancel_listing(&ObjectId::new(listing.as_str()))
        }
        TxIntent::CreateProposal(args) => {
            let draft = ProposalDraft {
                title: args.title.clone(),
                description: args.description.clone(),
                content_uri: args.content_uri.clone(),
                voting_period_secs: args.voting_period,
            };
            let proposal = draft.validate(&args.channel_id, DEFAULT_MIN_VOTING_PERIOD_SECS)?;
            builder.create_proposal(&proposal)
        }
        TxIntent::CastVote {
            proposal,
            share,
            against,
        } => builder.cast_vote(
            &ObjectId::new(proposal.as_str()),
            &ObjectId::new(share.as_str()),
            !against,
        ),
        TxIntent::ExecuteProposal { proposal } => {
            builder.execute_proposal(&ObjectId::new(proposal.as_str()))
        }
    }
    .map_err(notify)?;

    Ok(TransactionRequest::new(sender, call))
}

fn notify(e: GatewayError) -> anyhow::Error {
    anyhow::anyhow!(e.notification())
}
