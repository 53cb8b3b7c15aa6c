//! Command line replay tool for the AMM pair index.
use amm_index_domain::PricingConfig;
use amm_index_engine::ingest::{self, FileEventSource};
use amm_index_engine::sync::SyncProcessor;
use amm_index_store::EntityStore;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

mod manifest;

use manifest::Manifest;

#[derive(Parser)]
#[command(name = "amm-index")]
#[command(about = "Derived pricing and tracked metrics for AMM pools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay reserve-update events through the sync processor
    Replay {
        /// JSON manifest seeding exchanges, tokens and pools
        #[arg(short, long)]
        manifest: PathBuf,

        /// JSONL file of reserve updates in on-chain order
        #[arg(short, long)]
        events: PathBuf,
    },
    /// Print the active pricing configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Arc::new(PricingConfig::mainnet());

    match &cli.command {
        Commands::Replay { manifest, events } => {
            let manifest: Manifest = serde_json::from_str(
                &std::fs::read_to_string(manifest)
                    .with_context(|| format!("reading manifest {}", manifest.display()))?,
            )
            .context("parsing manifest")?;

            let mut store = EntityStore::new();
            manifest.seed(&mut store);

            let mut processor = SyncProcessor::new(config, store);
            let mut source = FileEventSource::open(events)
                .await
                .with_context(|| format!("opening event stream {}", events.display()))?;

            let processed = ingest::run(&mut processor, &mut source)
                .await
                .context("replaying events")?;
            println!("processed {processed} reserve updates\n");

            let store = processor.into_store();

            println!("exchanges");
            println!("{}", "-".repeat(70));
            for exchange in store.exchanges() {
                let rate = store.load_bundle(&exchange.address).entity.value;
                println!(
                    "{:<44} liquidity {:.2} ETH / {:.2} USD (ETH at {:.2} USD)",
                    exchange.address,
                    exchange.total_liquidity_eth,
                    exchange.total_liquidity_usd,
                    rate
                );
            }

            println!("\npools");
            println!("{}", "-".repeat(70));
            for pool in store.exchange_pairs() {
                println!(
                    "{:<44} reserves {:.4} / {:.4}  value {:.2} USD",
                    pool.address, pool.reserve0, pool.reserve1, pool.reserve_usd
                );
            }

            println!("\ntokens");
            println!("{}", "-".repeat(70));
            for token in store.tokens() {
                println!(
                    "{:<44} {:<8} liquidity {:.4}  price {:.6} ETH",
                    token.address, token.symbol, token.total_liquidity, token.eth_price
                );
            }
        }
        Commands::Config => {
            println!("WETH  {}", config.weth);
            println!("DAI   {}", config.dai);
            println!("USDC  {}", config.usdc);
            println!("USDT  {}", config.usdt);
            println!(
                "price discovery threshold  {} ETH",
                config.minimum_liquidity_threshold_eth
            );
            println!(
                "tracked volume threshold   {} USD",
                config.minimum_usd_threshold_new_pairs
            );
            println!("whitelist ({} anchors, in priority order)", config.whitelist.len());
            for anchor in &config.whitelist {
                println!("  {anchor}");
            }
            println!("untracked pairs ({})", config.untracked_pairs.len());
            for pair in &config.untracked_pairs {
                println!("  {pair}");
            }
        }
    }

    Ok(())
}
