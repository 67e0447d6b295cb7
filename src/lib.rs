//! # Ledger-Recon
//!
//! Reconciliation and classification of public blockchain explorer snapshots.
//!
//! This crate provides pure, side-effect-free functions that turn raw
//! per-address, per-transaction and per-block explorer records into the facts
//! a ledger browser displays: confirmed and unconfirmed balances, the direction
//! and net value of a transaction for an address, block linkage and the
//! coinbase miner address, and day-labeled price series.
//!
//! ## Architecture
//!
//! Data flows one way:
//! - Explorer gateway (external: fetching, retries, caching)
//! - Snapshot decoding (`wire`)
//! - Reconciliation and classification (this crate)
//! - Presentation (external: pages, tables, charts)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every operation is deterministic over a snapshot
//! 2. **Integer Amounts**: satoshi arithmetic, decimal only for display
//! 3. **Local Failures**: an error degrades one field or drops one row
//! 4. **Explicit Absence**: optional wire fields are `Option`, never falsy checks
//!
//! ## Usage
//!
//! ```rust
//! use ledger_recon::LedgerEngine;
//! use ledger_recon::types::*;
//! use ledger_recon::Amount;
//!
//! let engine = LedgerEngine::new();
//! let tx = Transaction {
//!     id: "f4184fc5".to_string(),
//!     vin: vec![TxInput {
//!         prevout: Some(TxOutput { address: Some("A".to_string()), value: Amount::from_sat(150_000) }),
//!     }],
//!     vout: vec![TxOutput { address: Some("A".to_string()), value: Amount::from_sat(100_000) }],
//!     fee: None,
//!     status: None,
//! };
//! let result = engine.classify(&tx, "A").unwrap();
//! assert_eq!(result.direction, Direction::SelfTransfer);
//! assert_eq!(result.net_value, Amount::from_sat(-50_000));
//! ```

pub mod types;
pub mod constants;
pub mod amount;
pub mod balance;
pub mod transaction;
pub mod block;
pub mod chart;
pub mod wire;
pub mod view;
pub mod config;
pub mod telemetry;
pub mod error;

// Re-export commonly used types
pub use types::*;
pub use amount::Amount;
pub use balance::{Balance, DataAnomaly, Reconciliation};
pub use transaction::Classification;
pub use block::Linkage;
pub use view::{BlockView, TransactionRow, WalletSummary};
pub use config::EngineConfig;
pub use error::{LedgerError, Result};

/// Main reconciliation engine
///
/// Stateless apart from the display configuration; every method is a pure
/// function of its arguments.
///
/// # Examples
///
/// ```
/// use ledger_recon::LedgerEngine;
/// use ledger_recon::types::*;
/// use ledger_recon::Amount;
///
/// let engine = LedgerEngine::new();
///
/// let info = AddressInfo {
///     address: Some("bc1qexample".to_string()),
///     chain_stats: TxoStats {
///         funded_sum: Amount::from_sat(500_000_000),
///         spent_sum: Amount::from_sat(200_000_000),
///         ..TxoStats::default()
///     },
///     mempool_stats: TxoStats::default(),
/// };
///
/// let balance = engine.reconcile(&info).balance;
/// assert_eq!(balance.confirmed, Amount::from_sat(300_000_000)); // 3 BTC
/// assert_eq!(balance.total, Amount::from_sat(300_000_000));
/// ```
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    config: EngineConfig,
}

impl LedgerEngine {
    /// Create an engine with default display labels
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_recon::LedgerEngine;
    ///
    /// let engine = LedgerEngine::new();
    /// assert_eq!(engine.config().labels.unconfirmed, "Unconfirmed");
    /// ```
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Derive confirmed, unconfirmed and total balance of an address
    pub fn reconcile(&self, info: &AddressInfo) -> Reconciliation {
        balance::reconcile(info)
    }

    /// Classify a transaction relative to `subject`
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_recon::{LedgerEngine, LedgerError};
    /// use ledger_recon::types::*;
    /// use ledger_recon::Amount;
    ///
    /// let engine = LedgerEngine::new();
    /// let tx = Transaction {
    ///     id: "ab".to_string(),
    ///     vin: vec![],
    ///     vout: vec![TxOutput { address: Some("B".to_string()), value: Amount::from_sat(1_000) }],
    ///     fee: Some(Amount::from_sat(200)),
    ///     status: None,
    /// };
    ///
    /// assert_eq!(engine.classify(&tx, "B").unwrap().direction, Direction::Incoming);
    /// assert_eq!(engine.classify(&tx, "A"), Err(LedgerError::NotRelated));
    /// ```
    pub fn classify(&self, tx: &Transaction, subject: &str) -> Result<Classification> {
        transaction::classify(tx, subject)
    }

    /// Previous-hash link of a block
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_recon::LedgerEngine;
    /// use ledger_recon::types::*;
    ///
    /// let engine = LedgerEngine::new();
    /// let genesis = Block {
    ///     hash: "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f".to_string(),
    ///     height: 0,
    ///     version: 1,
    ///     timestamp: 1231006505,
    ///     tx_count: 1,
    ///     size: 285,
    ///     weight: 816,
    ///     merkle_root: "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b".to_string(),
    ///     previous_hash: None,
    ///     bits: Some(0x1d00ffff),
    ///     nonce: Some(2083236893),
    ///     difficulty: Some(1.0),
    /// };
    ///
    /// assert!(engine.linkage(&genesis).is_genesis);
    /// ```
    pub fn linkage(&self, block: &Block) -> Linkage {
        block::linkage(block)
    }

    /// Next block on the best chain, if known
    pub fn next_link<'a>(&self, status: &'a BlockStatus) -> Option<&'a Hash> {
        block::next_link(status)
    }

    /// Payout address of a coinbase transaction's first output
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_recon::{LedgerEngine, LedgerError};
    /// use ledger_recon::types::*;
    ///
    /// let engine = LedgerEngine::new();
    /// let coinbase = Transaction {
    ///     id: "cb".to_string(),
    ///     vin: vec![TxInput { prevout: None }],
    ///     vout: vec![],
    ///     fee: None,
    ///     status: None,
    /// };
    ///
    /// assert_eq!(engine.miner_address(&coinbase), Err(LedgerError::NoMinerAddress));
    /// ```
    pub fn miner_address(&self, coinbase: &Transaction) -> Result<Address> {
        block::miner_address(coinbase)
    }

    /// Miner address from a block's transaction list (first entry is coinbase)
    pub fn miner_address_of_block(&self, txs: &[Transaction]) -> Result<Address> {
        block::miner_address_of_block(txs)
    }

    /// Day-label a price series in the local calendar
    pub fn normalize<'a>(&self, raw: &'a [RawPricePoint]) -> chart::ChartSeries<'a, chrono::Local> {
        chart::normalize(raw)
    }

    /// Balance summary with optional fiat value
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_recon::LedgerEngine;
    /// use ledger_recon::types::*;
    /// use ledger_recon::Amount;
    ///
    /// let engine = LedgerEngine::new();
    /// let info = AddressInfo {
    ///     chain_stats: TxoStats { funded_sum: Amount::from_sat(100_000_000), ..TxoStats::default() },
    ///     ..AddressInfo::default()
    /// };
    ///
    /// let summary = engine.wallet_summary(&info, Some(-1.0));
    /// assert_eq!(engine.usd_display(&summary), "pending");
    /// ```
    pub fn wallet_summary(&self, info: &AddressInfo, spot_price: Option<f64>) -> WalletSummary {
        view::wallet_summary(info, spot_price)
    }

    /// Fiat value of a summary, or the configured pending label
    pub fn usd_display(&self, summary: &WalletSummary) -> String {
        summary.usd_display(&self.config.labels)
    }

    /// Display rows for an address history; unrelated transactions are omitted
    pub fn transaction_rows(&self, txs: &[Transaction], subject: &str) -> Vec<TransactionRow> {
        view::transaction_rows(txs, subject, &self.config.labels)
    }

    /// Block page from whichever snapshots are available
    pub fn block_view(&self, block: &Block, txs: Option<&[Transaction]>, status: Option<&BlockStatus>) -> BlockView {
        view::block_view(block, txs, status)
    }

    /// Miner address of a block view, or the configured unknown label
    pub fn miner_display<'a>(&'a self, view: &'a BlockView) -> &'a str {
        view.miner_display(&self.config.labels)
    }
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new()
    }
}
