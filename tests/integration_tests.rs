//! Integration tests for ledger-recon

use ledger_recon::*;
use ledger_recon::wire::*;

const ADDRESS_INFO: &str = r#"{
    "address": "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh",
    "chain_stats": {"funded_txo_count": 2, "funded_txo_sum": 500000000,
                    "spent_txo_count": 1, "spent_txo_sum": 200000000, "tx_count": 3},
    "mempool_stats": {"funded_txo_count": 0, "funded_txo_sum": 0,
                      "spent_txo_count": 0, "spent_txo_sum": 0, "tx_count": 0}
}"#;

const HISTORY: &str = r#"[
    {"txid": "t-unconfirmed",
     "vin": [{"prevout": {"scriptpubkey_address": "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh", "value": 150000}}],
     "vout": [{"scriptpubkey_address": "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh", "value": 100000},
              {"scriptpubkey_address": "1BoatSLRHtKNngkdXEeobR76b53LETtpyT", "value": 49000}],
     "fee": 1000,
     "status": {"confirmed": false}},
    {"txid": "t-unrelated",
     "vin": [{"prevout": {"scriptpubkey_address": "1Other", "value": 5}}],
     "vout": [{"scriptpubkey_address": "1Else", "value": 5}],
     "status": {"confirmed": true, "block_time": 1700000000}},
    {"txid": "t-received",
     "vin": [{"prevout": {"scriptpubkey_address": "1Payer", "value": 500000000}}],
     "vout": [{"scriptpubkey_address": "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh", "value": 500000000}],
     "status": {"confirmed": true, "block_height": 800000, "block_time": 1690000000}}
]"#;

const BLOCK: &str = r#"{
    "id": "00000000000000000002a7c4c1e48d76c5a37902165a270156b7a8d72728a054",
    "height": 800000, "version": 536870912, "timestamp": 1690168629,
    "tx_count": 3721, "size": 1634919, "weight": 3993359,
    "merkle_root": "6fbfc8e5a8e3a1f23f0ed2a5d5b3c1b4a1b71b6a7b7b2bf9b0e4f9a1e5a0e3c2",
    "previousblockhash": "00000000000000000001b2505c11119fcf29be733ec379f686518bf1090a522a",
    "mediantime": 1690165851, "nonce": 106861918, "bits": 386193240, "difficulty": 53911173001054.59
}"#;

const COINBASE_TXS: &str = r#"[
    {"txid": "coinbase",
     "vin": [{"prevout": null}],
     "vout": [{"scriptpubkey_address": "1KFHE7w8BhaENAswwryaoccDb6qcT6DbYY", "value": 638000000},
              {"scriptpubkey": "6a24aa21a9ed", "value": 0}],
     "fee": 0,
     "status": {"confirmed": true, "block_height": 800000, "block_time": 1690168629}}
]"#;

#[test]
fn test_wallet_page_from_snapshots() {
    let engine = LedgerEngine::new();
    let info = decode_address_info(ADDRESS_INFO).unwrap();
    let price = decode_spot_price(r#"{"data": {"base": "BTC", "currency": "USD", "amount": "30000.00"}}"#).unwrap();

    let summary = engine.wallet_summary(&info, Some(price));
    assert_eq!(summary.confirmed, Amount::from_sat(300_000_000));
    assert_eq!(summary.unconfirmed, Amount::ZERO);
    assert_eq!(summary.total, Amount::from_sat(300_000_000));
    assert_eq!(summary.usd_value, Some(90_000.0));
    assert!(summary.anomalies.is_empty());

    let txs = decode_transactions(HISTORY).unwrap();
    let subject = info.address.as_deref().unwrap();
    let rows = engine.transaction_rows(&txs, subject);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "t-unconfirmed");
    assert_eq!(rows[0].date, "Unconfirmed");
    assert_eq!(rows[0].direction, Direction::SelfTransfer);
    assert_eq!(rows[0].amount, Amount::from_sat(-50_000));
    assert_eq!(rows[0].fee, Amount::from_sat(1_000));
    assert_eq!(rows[1].id, "t-received");
    assert_eq!(rows[1].direction, Direction::Incoming);
    assert_eq!(rows[1].confirmed_at, Some(1_690_000_000));
    assert_eq!(rows[1].fee, Amount::ZERO);
}

#[test]
fn test_block_page_from_snapshots() {
    let engine = LedgerEngine::new();
    let block = decode_block(BLOCK).unwrap();
    let txs = decode_transactions(COINBASE_TXS).unwrap();
    let status = decode_block_status(
        r#"{"in_best_chain": true, "height": 800000,
            "next_best": "000000000000000000006d8e8a2b5c5e0e3b4f0d2b2b7fb5c2d4e3f0a1b2c3d4"}"#,
    )
    .unwrap();

    let view = engine.block_view(&block, Some(txs.as_slice()), Some(&status));
    assert_eq!(view.height, 800_000);
    assert!(!view.is_genesis);
    assert_eq!(
        view.previous_hash.as_deref(),
        Some("00000000000000000001b2505c11119fcf29be733ec379f686518bf1090a522a")
    );
    assert_eq!(view.miner_address.as_deref(), Some("1KFHE7w8BhaENAswwryaoccDb6qcT6DbYY"));
    assert_eq!(
        view.next_hash.as_deref(),
        Some("000000000000000000006d8e8a2b5c5e0e3b4f0d2b2b7fb5c2d4e3f0a1b2c3d4")
    );
    assert_eq!(view.in_best_chain, Some(true));
    assert_eq!(view.status_height, Some(800_000));
    assert_eq!(view.nonce, Some(106_861_918));
    assert_eq!(view.bits, Some(386_193_240));
}

#[test]
fn test_genesis_block() {
    let engine = LedgerEngine::new();
    let genesis = decode_block(
        r#"{"id": "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f",
            "height": 0, "version": 1, "timestamp": 1231006505, "tx_count": 1,
            "size": 285, "weight": 816,
            "merkle_root": "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b",
            "previousblockhash": null, "nonce": 2083236893, "bits": 486604799, "difficulty": 1}"#,
    )
    .unwrap();

    let link = engine.linkage(&genesis);
    assert!(link.is_genesis);
    assert_eq!(link.previous, None);
}

#[test]
fn test_zero_block_fields_are_present() {
    let block = decode_block(
        r#"{"id": "h", "height": 1, "timestamp": 1, "tx_count": 1, "size": 1, "weight": 4,
            "merkle_root": "m", "previousblockhash": "p", "nonce": 0, "bits": 0, "difficulty": 0}"#,
    )
    .unwrap();

    let view = LedgerEngine::new().block_view(&block, None, None);
    assert_eq!(view.nonce, Some(0));
    assert_eq!(view.bits, Some(0));
    assert_eq!(view.difficulty, Some(0.0));
}

#[test]
fn test_chart_from_market_chart() {
    let raw = decode_market_chart(
        r#"{"prices": [[1723075200000, 61000.5], [1723086000000, 61200.0], [1723161600000, 60100.25]],
            "market_caps": [], "total_volumes": []}"#,
    )
    .unwrap();

    let points: Vec<ChartPoint> = chart::normalize_in(&raw, chrono::Utc).iter().collect();
    let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["8/8", "8/8", "8/9"]);
    assert_eq!(points[2].value, 60_100.25);

    assert_eq!(LedgerEngine::new().normalize(&raw).len(), 3);
}
