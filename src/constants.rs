//! Ledger display constants

/// Satoshis per BTC
pub const SATOSHIS_PER_BTC: i64 = 100_000_000;

/// Maximum money supply in satoshis; no single output or fee can exceed it
pub const MAX_MONEY: i64 = 21_000_000 * SATOSHIS_PER_BTC;

/// Fractional digits shown for a BTC amount
pub const BTC_DECIMALS: usize = 8;

/// Row date shown for a transaction without a block time
pub const UNCONFIRMED_LABEL: &str = "Unconfirmed";

/// Miner address shown when the coinbase payout cannot be resolved
pub const UNKNOWN_MINER_LABEL: &str = "unknown";

/// Fiat value shown while the spot price is missing or invalid
pub const PENDING_LABEL: &str = "pending";

/// Fiat currency the spot price is quoted in
pub const DEFAULT_FIAT_CURRENCY: &str = "USD";

/// Prefix for environment overrides of the engine configuration
pub const ENV_PREFIX: &str = "LEDGER";
