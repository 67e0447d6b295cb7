//! Decoding of explorer gateway JSON snapshots

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::amount::parse_spot_price;
use crate::error::Result;
use crate::types::*;

/// `{data: {amount}}` spot price envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotPriceResponse {
    pub data: SpotPriceData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotPriceData {
    /// Decimal string, e.g. `"64250.17"`
    pub amount: String,
    #[serde(default)]
    pub currency: Option<String>,
}

/// `{prices: [[timestamp_ms, price], ...]}` market chart envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    #[serde(default)]
    pub prices: Vec<RawPricePoint>,
}

pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

pub fn decode_address_info(json: &str) -> Result<AddressInfo> {
    decode(json)
}

pub fn decode_transaction(json: &str) -> Result<Transaction> {
    decode(json)
}

/// Transaction list, as returned for an address history or a block page
pub fn decode_transactions(json: &str) -> Result<Vec<Transaction>> {
    decode(json)
}

pub fn decode_block(json: &str) -> Result<Block> {
    decode(json)
}

pub fn decode_block_status(json: &str) -> Result<BlockStatus> {
    decode(json)
}

/// Decode and validate a spot price; malformed or non-positive amounts are
/// rejected with `InvalidPrice`.
pub fn decode_spot_price(json: &str) -> Result<f64> {
    let response: SpotPriceResponse = decode(json)?;
    parse_spot_price(&response.data.amount)
}

pub fn decode_market_chart(json: &str) -> Result<Vec<RawPricePoint>> {
    let chart: MarketChart = decode(json)?;
    Ok(chart.prices)
}
