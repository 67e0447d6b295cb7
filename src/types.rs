//! Explorer snapshot types
//!
//! Field names on the wire follow the explorer gateway's JSON contract; the
//! Rust names follow the ledger model. Every optional wire field is an
//! explicit `Option` so that a legitimate zero is never mistaken for absence.
//! Raw amounts are never negative; decoding rejects negative or out-of-range
//! values rather than letting them reach the arithmetic.

use serde::{Deserialize, Serialize};

use crate::amount::{self, Amount};

/// Address identifier (base58/bech32, opaque to the engine)
pub type Address = String;

/// Hex-encoded block or transaction hash
pub type Hash = String;

/// Unix timestamp in seconds
pub type Timestamp = i64;

/// Funded/spent output statistics for one side of an address (chain or mempool)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxoStats {
    #[serde(rename = "funded_txo_sum", deserialize_with = "amount::wire_sum", default)]
    pub funded_sum: Amount,
    #[serde(rename = "spent_txo_sum", deserialize_with = "amount::wire_sum", default)]
    pub spent_sum: Amount,
    #[serde(default)]
    pub tx_count: u64,
    #[serde(rename = "funded_txo_count", default)]
    pub funded_count: u64,
    #[serde(rename = "spent_txo_count", default)]
    pub spent_count: u64,
}

/// Address info snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub chain_stats: TxoStats,
    #[serde(default)]
    pub mempool_stats: TxoStats,
}

/// Transaction output. `address` is absent for non-standard scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    #[serde(rename = "scriptpubkey_address", default)]
    pub address: Option<Address>,
    #[serde(deserialize_with = "amount::wire_money")]
    pub value: Amount,
}

/// Transaction input. `prevout` is absent for coinbase inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    #[serde(default)]
    pub prevout: Option<TxOutput>,
}

/// Confirmation status as reported by the gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatus {
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub block_height: Option<u64>,
    #[serde(default)]
    pub block_hash: Option<Hash>,
    #[serde(default)]
    pub block_time: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "txid")]
    pub id: Hash,
    #[serde(default)]
    pub vin: Vec<TxInput>,
    #[serde(default)]
    pub vout: Vec<TxOutput>,
    #[serde(deserialize_with = "amount::wire_money_opt", default)]
    pub fee: Option<Amount>,
    #[serde(default)]
    pub status: Option<TxStatus>,
}

impl Transaction {
    /// Block time of the confirming block; `None` while unconfirmed.
    pub fn confirmed_at(&self) -> Option<Timestamp> {
        self.status.as_ref().and_then(|status| status.block_time)
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at().is_some()
    }
}

/// Block snapshot. `previous_hash` is absent only for the genesis block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "id")]
    pub hash: Hash,
    pub height: u64,
    #[serde(default)]
    pub version: i64,
    pub timestamp: Timestamp,
    pub tx_count: u64,
    pub size: u64,
    pub weight: u64,
    pub merkle_root: Hash,
    #[serde(rename = "previousblockhash", default)]
    pub previous_hash: Option<Hash>,
    #[serde(default)]
    pub bits: Option<u32>,
    #[serde(default)]
    pub nonce: Option<u64>,
    #[serde(default)]
    pub difficulty: Option<f64>,
}

/// Block status: best-chain membership and the forward link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStatus {
    #[serde(default)]
    pub in_best_chain: bool,
    #[serde(default)]
    pub height: Option<u64>,
    #[serde(default)]
    pub next_best: Option<Hash>,
}

/// Direction of a transaction relative to a subject address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Incoming,
    Outgoing,
    /// Subject is both sender and receiver (change output, internal transfer)
    #[serde(rename = "Self")]
    SelfTransfer,
}

/// Raw price sample: (milliseconds since epoch, price)
pub type RawPricePoint = (i64, f64);

/// Day-labeled chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub value: f64,
    /// `"{month}/{day}"` in the viewer's calendar
    pub label: String,
}
