//! ledger-view: render explorer snapshots into view records
//!
//! Reads gateway JSON snapshots from disk and prints the derived view records
//! as JSON. Performs no network I/O.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use ledger_recon::chart::ChartSeries;
use ledger_recon::telemetry::init_tracing;
use ledger_recon::types::*;
use ledger_recon::{wire, BlockView, EngineConfig, LedgerEngine, TransactionRow, WalletSummary};

#[derive(Parser, Debug)]
#[command(name = "ledger-view", version, about = "Reconcile explorer snapshots into view records")]
struct Cli {
    /// Configuration file (toml, json or yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Balance summary and transaction rows for an address
    Wallet {
        #[arg(long)]
        address: Address,
        /// Address info snapshot
        #[arg(long)]
        info: PathBuf,
        /// Address transaction history snapshot
        #[arg(long)]
        txs: Option<PathBuf>,
        /// Spot price snapshot
        #[arg(long)]
        price: Option<PathBuf>,
    },
    /// Block details with linkage and miner address
    Block {
        #[arg(long)]
        block: PathBuf,
        /// Block transaction list; its first entry is taken as coinbase
        #[arg(long)]
        txs: Option<PathBuf>,
        /// Block status snapshot
        #[arg(long)]
        status: Option<PathBuf>,
    },
    /// Day-labeled price series
    Chart {
        /// Market chart snapshot
        #[arg(long)]
        prices: PathBuf,
        /// Label days in UTC instead of the local calendar
        #[arg(long)]
        utc: bool,
    },
}

#[derive(Serialize)]
struct WalletPage {
    address: Address,
    summary: WalletSummary,
    usd_display: String,
    /// Absent when the history snapshot was missing or failed to load
    transactions: Option<Vec<TransactionRow>>,
}

#[derive(Serialize)]
struct BlockPage {
    block: BlockView,
    miner_display: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EngineConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Err(err) = init_tracing(&config.log) {
        eprintln!("tracing disabled: {}", err);
    }
    let engine = LedgerEngine::with_config(config);

    let output = match cli.command {
        Command::Wallet { address, info, txs, price } => {
            serde_json::to_string_pretty(&wallet_page(&engine, address, &info, txs.as_deref(), price.as_deref())?)?
        }
        Command::Block { block, txs, status } => {
            serde_json::to_string_pretty(&block_page(&engine, &block, txs.as_deref(), status.as_deref())?)?
        }
        Command::Chart { prices, utc } => {
            let raw = wire::decode_market_chart(&read(&prices)?)
                .with_context(|| format!("failed to decode market chart {}", prices.display()))?;
            if utc {
                serde_json::to_string_pretty(&collect(&ledger_recon::chart::normalize_in(&raw, chrono::Utc)))?
            } else {
                serde_json::to_string_pretty(&collect(&engine.normalize(&raw)))?
            }
        }
    };

    println!("{}", output);
    Ok(())
}

fn wallet_page(
    engine: &LedgerEngine,
    address: Address,
    info_path: &Path,
    txs_path: Option<&Path>,
    price_path: Option<&Path>,
) -> Result<WalletPage> {
    let info = wire::decode_address_info(&read(info_path)?)
        .with_context(|| format!("failed to decode address info {}", info_path.display()))?;

    let spot_price = price_path.and_then(|path| optional(path, wire::decode_spot_price));
    let summary = engine.wallet_summary(&info, spot_price);
    for anomaly in &summary.anomalies {
        warn!(%address, "{}", anomaly);
    }

    let transactions = txs_path
        .and_then(|path| optional(path, wire::decode_transactions))
        .map(|txs| engine.transaction_rows(&txs, &address));
    if let Some(rows) = &transactions {
        info!(%address, rows = rows.len(), "Classified address history");
    }

    Ok(WalletPage {
        usd_display: engine.usd_display(&summary),
        address,
        summary,
        transactions,
    })
}

fn block_page(
    engine: &LedgerEngine,
    block_path: &Path,
    txs_path: Option<&Path>,
    status_path: Option<&Path>,
) -> Result<BlockPage> {
    let block = wire::decode_block(&read(block_path)?)
        .with_context(|| format!("failed to decode block {}", block_path.display()))?;

    let txs = txs_path.and_then(|path| optional(path, wire::decode_transactions));
    let status = status_path.and_then(|path| optional(path, wire::decode_block_status));

    let view = engine.block_view(&block, txs.as_deref(), status.as_ref());
    Ok(BlockPage {
        miner_display: engine.miner_display(&view).to_string(),
        block: view,
    })
}

fn collect<Tz: chrono::TimeZone>(series: &ChartSeries<'_, Tz>) -> Vec<ChartPoint> {
    series.iter().collect()
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Load a snapshot whose absence only degrades one panel
fn optional<T>(path: &Path, decode: impl Fn(&str) -> ledger_recon::Result<T>) -> Option<T> {
    let loaded = read(path).and_then(|json| decode(&json).map_err(anyhow::Error::from));
    match loaded {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Snapshot unavailable, panel left empty");
            None
        }
    }
}
