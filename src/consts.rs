// Basis points denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u16 = 10_000;

// Graduation threshold bounds, in percent of the initial supply
pub const MIN_GRADUATION_THRESHOLD_PCT: u8 = 50;
pub const MAX_GRADUATION_THRESHOLD_PCT: u8 = 95;

// Maximum LP + host fee accepted at launch (10%)
pub const MAX_TOTAL_FEE_BPS: u16 = 1_000;

pub const SATS_PER_BTC: u128 = 100_000_000;

// Asset identifier the AMM uses for BTC
pub const BTC_ASSET_PUBKEY: &str =
    "020202020202020202020202020202020202020202020202020202020202020202";

pub const MAX_TICKER_LEN: usize = 6;
pub const MAX_TOKEN_NAME_LEN: usize = 32;
pub const MAX_TOKEN_DECIMALS: u8 = 18;
