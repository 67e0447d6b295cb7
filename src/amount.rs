//! Fixed-point satoshi amounts
//!
//! All arithmetic stays in integer satoshis. Conversion to a decimal BTC or
//! fiat figure happens only at presentation time.
//!
//! Arithmetic saturates at the `i64` bounds instead of wrapping, and raw wire
//! amounts are range-checked on decode (see [`wire_sum`] and [`wire_money`]).

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::*;
use crate::error::{LedgerError, Result};

/// Signed satoshi value.
///
/// Signed because derived balances and net transaction values may be
/// negative; raw wire sums are never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_sat(sat: i64) -> Self {
        Amount(sat)
    }

    pub const fn to_sat(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Value in BTC: sat / 10^8
    pub fn to_bitcoin(self) -> f64 {
        self.0 as f64 / SATOSHIS_PER_BTC as f64
    }

    /// Fiat value at `spot_price` per BTC.
    ///
    /// Fails with [`LedgerError::InvalidPrice`] unless the price is finite and
    /// strictly positive.
    pub fn to_usd(self, spot_price: f64) -> Result<f64> {
        validate_spot_price(spot_price)?;
        Ok(self.to_bitcoin() * spot_price)
    }
}

/// Reject anything that is not a positive finite price.
pub fn validate_spot_price(spot_price: f64) -> Result<f64> {
    if !spot_price.is_finite() {
        return Err(LedgerError::InvalidPrice(format!("{} is not finite", spot_price)));
    }
    if spot_price <= 0.0 {
        return Err(LedgerError::InvalidPrice(format!("{} is not positive", spot_price)));
    }
    Ok(spot_price)
}

/// Parse the decimal-string spot price carried by the gateway (`data.amount`).
pub fn parse_spot_price(raw: &str) -> Result<f64> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| LedgerError::InvalidPrice(format!("'{}' is not a decimal number", raw)))?;
    validate_spot_price(price)
}

/// Aggregate wire sum (`funded_txo_sum`, `spent_txo_sum`): any non-negative `i64`.
///
/// Lifetime address totals can legitimately exceed [`MAX_MONEY`], so only
/// the sign and the `i64` range are enforced.
pub fn wire_sum<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Amount, D::Error> {
    let sat = u64::deserialize(deserializer)?;
    sum_from_sat(sat).map_err(D::Error::custom)
}

/// Single output value or fee: 0 ≤ value ≤ [`MAX_MONEY`].
pub fn wire_money<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Amount, D::Error> {
    let sat = u64::deserialize(deserializer)?;
    money_from_sat(sat).map_err(D::Error::custom)
}

/// [`wire_money`] for a field that may be `null` or absent.
pub fn wire_money_opt<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Amount>, D::Error> {
    Option::<u64>::deserialize(deserializer)?
        .map(money_from_sat)
        .transpose()
        .map_err(D::Error::custom)
}

fn sum_from_sat(sat: u64) -> std::result::Result<Amount, String> {
    i64::try_from(sat)
        .map(Amount)
        .map_err(|_| format!("amount {} exceeds the representable range", sat))
}

fn money_from_sat(sat: u64) -> std::result::Result<Amount, String> {
    let amount = sum_from_sat(sat)?;
    if amount.0 > MAX_MONEY {
        return Err(format!("amount {} exceeds MAX_MONEY {}", sat, MAX_MONEY));
    }
    Ok(amount)
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        *self = *self - rhs;
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(self.0.saturating_neg())
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

impl From<i64> for Amount {
    fn from(sat: i64) -> Self {
        Amount(sat)
    }
}

/// Renders as BTC with eight fractional digits, e.g. `-0.00050000`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_btc = SATOSHIS_PER_BTC as u64;
        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            abs / per_btc,
            abs % per_btc,
            width = BTC_DECIMALS
        )
    }
}
