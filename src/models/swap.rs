use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::amount::string_amount;

/// Inputs of the local slippage and price-impact calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuoteRequest {
    pub amount_in: u128,
    pub reserve_in: u128,
    pub reserve_out: u128,
    pub max_slippage_bps: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwapQuoteResult {
    #[serde(with = "string_amount")]
    pub amount_out: u128,
    #[serde(with = "string_amount")]
    pub min_amount_out: u128, // always <= amount_out
    pub price_impact_pct: f64,
}

/// Body of `/pools/{pool_id}/quote` and `/pools/{pool_id}/swap`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub asset_in: String,
    pub asset_out: String,
    #[serde(with = "string_amount")]
    pub amount_in: u128,
    pub max_slippage_bps: Option<u16>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteDisplay {
    pub amount_in: String,
    pub amount_out: String,
    pub min_amount_out: String,
    pub price_impact: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub quote_id: Uuid,
    pub quoted_at: DateTime<Utc>,
    pub pool_id: String,
    pub asset_in: String,
    pub asset_out: String,
    #[serde(with = "string_amount")]
    pub amount_in: u128,
    #[serde(with = "string_amount")]
    pub amount_out: u128,
    #[serde(with = "string_amount")]
    pub min_amount_out: u128,
    pub max_slippage_bps: u16,
    /// `None` when the impact is undefined (empty input reserve).
    pub price_impact_pct: Option<f64>,
    pub vendor_price_impact_pct: f64,
    pub execution_price: f64,
    pub display: QuoteDisplay,
}

/// Vendor `simulateSwap` inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulateSwapParams {
    pub pool_id: String,
    pub asset_in: String,
    pub asset_out: String,
    pub amount_in: u128,
}

/// Vendor `simulateSwap` result, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapSimulation {
    pub amount_out: u128,
    pub execution_price: f64,
    pub price_impact_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteSwapParams {
    pub pool_id: String,
    pub user_pubkey: String,
    pub asset_in: String,
    pub asset_out: String,
    pub amount_in: u128,
    pub min_amount_out: u128,
    pub max_slippage_bps: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedSwap {
    pub swap_id: String,
    pub amount_out: u128,
    /// The AMM filled below the requested floor. The swap still happened.
    pub below_minimum: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwapResponse {
    pub swap_id: String,
    pub pool_id: String,
    #[serde(with = "string_amount")]
    pub amount_in: u128,
    #[serde(with = "string_amount")]
    pub amount_out: u128,
    #[serde(with = "string_amount")]
    pub min_amount_out: u128,
    pub below_minimum: bool,
    pub display: QuoteDisplay,
}
