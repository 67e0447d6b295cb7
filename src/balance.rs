//! Address balance reconciliation

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::amount::Amount;
use crate::types::*;

/// Confirmed, unconfirmed and total balance of an address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub confirmed: Amount,
    pub unconfirmed: Amount,
    pub total: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceComponent {
    Confirmed,
    Unconfirmed,
}

/// Non-fatal warning: upstream reports more spent than funded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAnomaly {
    pub component: BalanceComponent,
    pub funded: Amount,
    pub spent: Amount,
}

impl DataAnomaly {
    /// The raw signed balance that triggered the warning
    pub fn balance(&self) -> Amount {
        self.funded - self.spent
    }
}

impl fmt::Display for DataAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} balance is negative: funded {} < spent {}",
            self.component,
            self.funded.to_sat(),
            self.spent.to_sat()
        )
    }
}

/// Balance together with any anomalies found while deriving it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub balance: Balance,
    pub anomalies: Vec<DataAnomaly>,
}

impl Reconciliation {
    pub fn is_consistent(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Reconcile: 𝒜 → ℤ × ℤ × ℤ
///
/// For address info a:
/// 1. confirmed = a.chain.funded − a.chain.spent
/// 2. unconfirmed = a.mempool.funded − a.mempool.spent
/// 3. total = confirmed + unconfirmed
///
/// Negative components are surfaced unclamped and reported as [`DataAnomaly`].
pub fn reconcile(info: &AddressInfo) -> Reconciliation {
    let confirmed = net(&info.chain_stats);
    let unconfirmed = net(&info.mempool_stats);

    let mut anomalies = Vec::new();
    check_component(BalanceComponent::Confirmed, &info.chain_stats, &mut anomalies);
    check_component(BalanceComponent::Unconfirmed, &info.mempool_stats, &mut anomalies);

    for anomaly in &anomalies {
        warn!(
            address = info.address.as_deref().unwrap_or("<unknown>"),
            component = ?anomaly.component,
            funded = anomaly.funded.to_sat(),
            spent = anomaly.spent.to_sat(),
            "Negative derived balance in address snapshot"
        );
    }

    Reconciliation {
        balance: Balance {
            confirmed,
            unconfirmed,
            total: confirmed + unconfirmed,
        },
        anomalies,
    }
}

fn net(stats: &TxoStats) -> Amount {
    stats.funded_sum - stats.spent_sum
}

fn check_component(component: BalanceComponent, stats: &TxoStats, anomalies: &mut Vec<DataAnomaly>) {
    if stats.spent_sum > stats.funded_sum {
        anomalies.push(DataAnomaly {
            component,
            funded: stats.funded_sum,
            spent: stats.spent_sum,
        });
    }
}

/// Lifetime activity of an address across chain and mempool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressActivity {
    pub total_received: Amount,
    pub total_sent: Amount,
    pub tx_count: u64,
    pub unconfirmed_tx_count: u64,
}

pub fn activity(info: &AddressInfo) -> AddressActivity {
    AddressActivity {
        total_received: info.chain_stats.funded_sum + info.mempool_stats.funded_sum,
        total_sent: info.chain_stats.spent_sum + info.mempool_stats.spent_sum,
        tx_count: info.chain_stats.tx_count.saturating_add(info.mempool_stats.tx_count),
        unconfirmed_tx_count: info.mempool_stats.tx_count,
    }
}
