//! Transaction classification relative to a subject address

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amount::Amount;
use crate::error::{LedgerError, Result};
use crate::types::*;

/// Classify result for one (transaction, subject) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub direction: Direction,
    /// value_in − value_out from the subject's point of view
    pub net_value: Amount,
    pub value_in: Amount,
    pub value_out: Amount,
    /// Zero when the gateway omitted the fee
    pub fee: Amount,
}

/// ValueIn: 𝒯𝒳 × 𝒜 → ℤ
///
/// Σ o.value for o ∈ tx.vout with o.address = subject.
/// Outputs without an address never contribute.
pub fn value_in(tx: &Transaction, subject: &str) -> Amount {
    tx.vout
        .iter()
        .filter(|output| pays(output, subject))
        .map(|output| output.value)
        .sum()
}

/// ValueOut: 𝒯𝒳 × 𝒜 → ℤ
///
/// Σ i.prevout.value for i ∈ tx.vin with a prevout paying subject.
/// Coinbase inputs (no prevout) never contribute.
pub fn value_out(tx: &Transaction, subject: &str) -> Amount {
    tx.vin
        .iter()
        .filter_map(|input| input.prevout.as_ref())
        .filter(|prevout| pays(prevout, subject))
        .map(|prevout| prevout.value)
        .sum()
}

fn pays(output: &TxOutput, subject: &str) -> bool {
    output.address.as_deref() == Some(subject)
}

/// Classify: 𝒯𝒳 × 𝒜 → {Incoming, Outgoing, Self} × ℤ × ℤ
///
/// 1. Let in = ValueIn(tx, a), out = ValueOut(tx, a)
/// 2. in > 0 ∧ out > 0 → Self
/// 3. in > 0 → Incoming
/// 4. out > 0 → Outgoing
/// 5. Otherwise: NotRelated
///
/// net = in − out; fee = tx.fee, or zero when absent.
pub fn classify(tx: &Transaction, subject: &str) -> Result<Classification> {
    let value_in = value_in(tx, subject);
    let value_out = value_out(tx, subject);

    let direction = match (value_in.is_positive(), value_out.is_positive()) {
        (true, true) => Direction::SelfTransfer,
        (true, false) => Direction::Incoming,
        (false, true) => Direction::Outgoing,
        (false, false) => return Err(LedgerError::NotRelated),
    };

    Ok(Classification {
        direction,
        net_value: value_in - value_out,
        value_in,
        value_out,
        fee: tx.fee.unwrap_or(Amount::ZERO),
    })
}

/// Classify every transaction of an address history, in order.
///
/// Transactions that do not touch `subject` are dropped; a failure on one
/// transaction never affects its siblings.
pub fn classify_history<'a>(
    txs: &'a [Transaction],
    subject: &str,
) -> Vec<(&'a Transaction, Classification)> {
    txs.iter()
        .filter_map(|tx| match classify(tx, subject) {
            Ok(classification) => Some((tx, classification)),
            Err(err) => {
                debug!(txid = %tx.id, subject, error = %err, "Skipping transaction row");
                None
            }
        })
        .collect()
}

/// Every input lacks a prevout (block reward creation)
pub fn is_coinbase(tx: &Transaction) -> bool {
    !tx.vin.is_empty() && tx.vin.iter().all(|input| input.prevout.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(address: Option<&str>, value: i64) -> TxOutput {
        TxOutput {
            address: address.map(str::to_string),
            value: Amount::from_sat(value),
        }
    }

    fn spend(address: Option<&str>, value: i64) -> TxInput {
        TxInput {
            prevout: Some(output(address, value)),
        }
    }

    fn tx(vin: Vec<TxInput>, vout: Vec<TxOutput>, fee: Option<i64>) -> Transaction {
        Transaction {
            id: "ab".repeat(32),
            vin,
            vout,
            fee: fee.map(Amount::from_sat),
            status: None,
        }
    }

    #[test]
    fn test_classify_incoming() {
        let tx = tx(vec![spend(Some("B"), 200_000)], vec![output(Some("A"), 100_000)], Some(500));
        let result = classify(&tx, "A").unwrap();
        assert_eq!(result.direction, Direction::Incoming);
        assert_eq!(result.net_value, Amount::from_sat(100_000));
        assert_eq!(result.fee, Amount::from_sat(500));
    }

    #[test]
    fn test_classify_outgoing() {
        let tx = tx(vec![spend(Some("A"), 200_000)], vec![output(Some("B"), 199_000)], Some(1_000));
        let result = classify(&tx, "A").unwrap();
        assert_eq!(result.direction, Direction::Outgoing);
        assert_eq!(result.net_value, Amount::from_sat(-200_000));
    }

    #[test]
    fn test_classify_self_with_change() {
        let tx = tx(vec![spend(Some("A"), 150_000)], vec![output(Some("A"), 100_000)], None);
        let result = classify(&tx, "A").unwrap();
        assert_eq!(result.value_in, Amount::from_sat(100_000));
        assert_eq!(result.value_out, Amount::from_sat(150_000));
        assert_eq!(result.net_value, Amount::from_sat(-50_000));
        assert_eq!(result.direction, Direction::SelfTransfer);
    }

    #[test]
    fn test_classify_balanced_self_transfer_is_not_unrelated() {
        let tx = tx(vec![spend(Some("A"), 70_000)], vec![output(Some("A"), 70_000)], None);
        let result = classify(&tx, "A").unwrap();
        assert_eq!(result.direction, Direction::SelfTransfer);
        assert_eq!(result.net_value, Amount::ZERO);
    }

    #[test]
    fn test_classify_not_related() {
        let tx = tx(vec![spend(Some("B"), 10)], vec![output(Some("C"), 9)], None);
        assert_eq!(classify(&tx, "A"), Err(LedgerError::NotRelated));
    }

    #[test]
    fn test_missing_fee_is_zero() {
        let tx = tx(vec![], vec![output(Some("A"), 10)], None);
        assert_eq!(classify(&tx, "A").unwrap().fee, Amount::ZERO);
    }

    #[test]
    fn test_absent_address_outputs_are_ignored() {
        let tx = tx(vec![spend(None, 500)], vec![output(None, 400), output(Some("A"), 50)], None);
        assert_eq!(value_in(&tx, "A"), Amount::from_sat(50));
        assert_eq!(value_out(&tx, "A"), Amount::ZERO);
    }

    #[test]
    fn test_coinbase_never_outgoing() {
        let coinbase = tx(vec![TxInput { prevout: None }], vec![output(Some("M"), 625_000_000)], None);
        assert!(is_coinbase(&coinbase));
        assert_eq!(value_out(&coinbase, "M"), Amount::ZERO);
        assert_eq!(classify(&coinbase, "M").unwrap().direction, Direction::Incoming);
    }

    #[test]
    fn test_is_coinbase() {
        assert!(!is_coinbase(&tx(vec![], vec![], None)));
        assert!(!is_coinbase(&tx(vec![spend(Some("A"), 1)], vec![], None)));
    }

    #[test]
    fn test_classify_history_drops_unrelated_rows() {
        let txs = vec![
            tx(vec![], vec![output(Some("A"), 10)], None),
            tx(vec![spend(Some("B"), 10)], vec![output(Some("C"), 10)], None),
            tx(vec![spend(Some("A"), 10)], vec![output(Some("D"), 9)], None),
        ];

        let rows = classify_history(&txs, "A");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1.direction, Direction::Incoming);
        assert_eq!(rows[1].1.direction, Direction::Outgoing);
        assert!(std::ptr::eq(rows[1].0, &txs[2]));
    }
}
