//! View records handed to the presentation layer
//!
//! Builders here never fail: a value the engine cannot derive from a partial
//! snapshot is left absent and the rest of the record is still produced.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amount::Amount;
use crate::balance::{activity, reconcile, AddressActivity, DataAnomaly};
use crate::block::{linkage, miner_address_of_block, next_link};
use crate::config::DisplayLabels;
use crate::transaction::{classify_history, Classification};
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub confirmed: Amount,
    pub unconfirmed: Amount,
    pub total: Amount,
    /// Fiat value of `total`; absent while the spot price is missing or invalid
    pub usd_value: Option<f64>,
    pub activity: AddressActivity,
    pub anomalies: Vec<DataAnomaly>,
}

impl WalletSummary {
    /// Fiat value with two decimals, or the pending label
    pub fn usd_display(&self, labels: &DisplayLabels) -> String {
        match self.usd_value {
            Some(usd) => format!("{:.2}", usd),
            None => labels.pending.clone(),
        }
    }
}

pub fn wallet_summary(info: &AddressInfo, spot_price: Option<f64>) -> WalletSummary {
    let reconciliation = reconcile(info);
    let balance = reconciliation.balance;

    let usd_value = spot_price.and_then(|price| match balance.total.to_usd(price) {
        Ok(usd) => Some(usd),
        Err(err) => {
            debug!(error = %err, "Fiat value left pending");
            None
        }
    });

    WalletSummary {
        confirmed: balance.confirmed,
        unconfirmed: balance.unconfirmed,
        total: balance.total,
        usd_value,
        activity: activity(info),
        anomalies: reconciliation.anomalies,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: Hash,
    /// Block time; absent while unconfirmed
    pub confirmed_at: Option<Timestamp>,
    /// Formatted block time or the unconfirmed label
    pub date: String,
    pub direction: Direction,
    /// Net value for the subject address
    pub amount: Amount,
    pub fee: Amount,
}

pub fn transaction_row(tx: &Transaction, classification: &Classification, labels: &DisplayLabels) -> TransactionRow {
    let confirmed_at = tx.confirmed_at();
    let date = match confirmed_at {
        Some(ts) => format_timestamp(ts, &Local),
        None => labels.unconfirmed.clone(),
    };

    TransactionRow {
        id: tx.id.clone(),
        confirmed_at,
        date,
        direction: classification.direction,
        amount: classification.net_value,
        fee: classification.fee,
    }
}

/// Rows for every transaction touching `subject`, in input order
pub fn transaction_rows(txs: &[Transaction], subject: &str, labels: &DisplayLabels) -> Vec<TransactionRow> {
    classify_history(txs, subject)
        .into_iter()
        .map(|(tx, classification)| transaction_row(tx, &classification, labels))
        .collect()
}

/// `YYYY-MM-DD HH:MM:SS` in `tz`; empty when out of range
pub fn format_timestamp<Tz>(ts: Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_opt(ts, 0)
        .earliest()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockView {
    pub hash: Hash,
    pub height: u64,
    pub version: i64,
    pub timestamp: Timestamp,
    pub tx_count: u64,
    pub size: u64,
    pub weight: u64,
    pub merkle_root: Hash,
    pub previous_hash: Option<Hash>,
    pub is_genesis: bool,
    pub bits: Option<u32>,
    pub nonce: Option<u64>,
    pub difficulty: Option<f64>,
    pub miner_address: Option<Address>,
    pub next_hash: Option<Hash>,
    pub in_best_chain: Option<bool>,
    /// Height reported by the status snapshot
    pub status_height: Option<u64>,
}

impl BlockView {
    pub fn miner_display<'a>(&'a self, labels: &'a DisplayLabels) -> &'a str {
        self.miner_address.as_deref().unwrap_or(labels.unknown_miner.as_str())
    }
}

/// Assemble a block page from whichever snapshots the gateway delivered.
///
/// `txs` is the block's transaction list (only its first entry is read);
/// `status` supplies the forward link, best-chain flag and status height.
pub fn block_view(block: &Block, txs: Option<&[Transaction]>, status: Option<&BlockStatus>) -> BlockView {
    let link = linkage(block);

    let miner_address = txs.and_then(|txs| match miner_address_of_block(txs) {
        Ok(address) => Some(address),
        Err(err) => {
            debug!(block = %block.hash, error = %err, "Miner address unresolved");
            None
        }
    });

    BlockView {
        hash: block.hash.clone(),
        height: block.height,
        version: block.version,
        timestamp: block.timestamp,
        tx_count: block.tx_count,
        size: block.size,
        weight: block.weight,
        merkle_root: block.merkle_root.clone(),
        previous_hash: link.previous,
        is_genesis: link.is_genesis,
        bits: block.bits,
        nonce: block.nonce,
        difficulty: block.difficulty,
        miner_address,
        next_hash: status.and_then(next_link).cloned(),
        in_best_chain: status.map(|status| status.in_best_chain),
        status_height: status.and_then(|status| status.height),
    }
}
