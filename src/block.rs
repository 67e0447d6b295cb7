//! Block chain navigation: hash links and coinbase payout

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::types::*;

/// Backward link of a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Linkage {
    pub previous: Option<Hash>,
    pub is_genesis: bool,
}

/// Linkage: ℬ → ℍ? × 𝔹
///
/// is_genesis holds exactly when the block carries no previous hash.
pub fn linkage(block: &Block) -> Linkage {
    Linkage {
        previous: block.previous_hash.clone(),
        is_genesis: block.previous_hash.is_none(),
    }
}

/// Forward link: the next block on the best chain, if one exists yet
pub fn next_link(status: &BlockStatus) -> Option<&Hash> {
    status.next_best.as_ref()
}

/// First transaction of a block's transaction list.
///
/// Coinbase-ness is assumed from position only; inputs are not inspected.
pub fn coinbase_of(txs: &[Transaction]) -> Option<&Transaction> {
    txs.first()
}

/// MinerAddress: 𝒯𝒳 → 𝒜
///
/// Address paid by vout[0] of the coinbase transaction. Fails when there is
/// no first output or it pays a non-standard script.
pub fn miner_address(coinbase: &Transaction) -> Result<Address> {
    coinbase
        .vout
        .first()
        .and_then(|output| output.address.clone())
        .ok_or(LedgerError::NoMinerAddress)
}

/// Miner address from a block's transaction list (positional coinbase)
pub fn miner_address_of_block(txs: &[Transaction]) -> Result<Address> {
    coinbase_of(txs)
        .ok_or(LedgerError::NoMinerAddress)
        .and_then(miner_address)
}
