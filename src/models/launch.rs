use serde::{Deserialize, Serialize};
use crate::utils::amount::string_amount;

/// User input of the launch form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchParameters {
    #[serde(with = "string_amount")]
    pub initial_supply: u128,        // token base units
    pub graduation_threshold_pct: u8,
    #[serde(with = "string_amount")]
    pub target_raise: u128,          // sats
}

/// Virtual reserves that parameterize a single-sided bonding curve.
/// Asset A is the launched token, asset B is BTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualReserves {
    #[serde(with = "string_amount")]
    pub virtual_reserve_a: u128,
    #[serde(with = "string_amount")]
    pub virtual_reserve_b: u128,
    /// Tokens that must leave the pool before it graduates.
    #[serde(with = "string_amount")]
    pub threshold: u128,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LaunchPreviewRequest {
    #[serde(flatten)]
    pub params: LaunchParameters,
    #[serde(default)]
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaunchPreviewDisplay {
    pub initial_supply: String,
    pub threshold: String,
    pub target_raise: String,
    pub raise_at_graduation: String,
    pub initial_price: Option<String>,
    pub graduation_price: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaunchPreview {
    pub params: LaunchParameters,
    pub reserves: VirtualReserves,
    /// Sats it actually costs to buy the threshold out of the derived curve.
    #[serde(with = "string_amount")]
    pub raise_at_graduation: u128,
    pub initial_price_sats: Option<f64>,
    pub graduation_price_sats: Option<f64>,
    pub display: LaunchPreviewDisplay,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLaunchRequest {
    pub name: String,
    pub ticker: String,
    #[serde(default)]
    pub decimals: u8,
    #[serde(flatten)]
    pub params: LaunchParameters,
    pub lp_fee_bps: Option<u16>,
    pub host_fee_bps: Option<u16>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateLaunchResponse {
    pub token_id: String,
    pub pool_id: String,
    pub ticker: String,
    pub reserves: VirtualReserves,
    pub lp_fee_bps: u16,
    pub host_fee_bps: u16,
}
