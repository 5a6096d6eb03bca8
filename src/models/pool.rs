use serde::{Deserialize, Serialize};
use crate::models::VirtualReserves;
use crate::utils::amount::string_amount;

/// Bonding-curve state of a pool that has not been a plain AMM pool
/// from the start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveState {
    #[serde(with = "string_amount")]
    pub initial_reserve_a: u128,
    #[serde(with = "string_amount")]
    pub threshold: u128,
    pub graduated: bool,
}

/// A pool as reported by the AMM, after boundary validation.
/// Reserves are the effective (virtual-inclusive) reserves used for pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub pool_id: String,
    pub asset_a: String,
    pub asset_b: String,
    #[serde(with = "string_amount")]
    pub reserve_a: u128,
    #[serde(with = "string_amount")]
    pub reserve_b: u128,
    pub lp_fee_bps: u16,
    pub host_fee_bps: u16,
    pub curve: Option<CurveState>,
}

impl Pool {
    /// Returns `(reserve_in, reserve_out)` for a swap from `asset_in` to
    /// `asset_out`, or `None` if the pair does not match this pool.
    pub fn oriented_reserves(&self, asset_in: &str, asset_out: &str) -> Option<(u128, u128)> {
        if asset_in == self.asset_a && asset_out == self.asset_b {
            Some((self.reserve_a, self.reserve_b))
        } else if asset_in == self.asset_b && asset_out == self.asset_a {
            Some((self.reserve_b, self.reserve_a))
        } else {
            None
        }
    }

    pub fn tokens_sold(&self) -> Option<u128> {
        self.curve
            .as_ref()
            .map(|curve| curve.initial_reserve_a.saturating_sub(self.reserve_a))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolDisplay {
    pub reserve_a: String,
    pub reserve_b: String,
    pub spot_price: Option<String>,
    pub graduation_progress: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoolResponse {
    #[serde(flatten)]
    pub pool: Pool,
    pub spot_price_sats: Option<f64>,
    pub graduation_progress_pct: Option<f64>,
    pub display: PoolDisplay,
}

/// Inputs of the vendor's single-sided pool creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePoolParams {
    pub creator_pubkey: String,
    pub asset_a: String,
    pub asset_b: String,
    pub asset_a_amount: u128,
    pub reserves: VirtualReserves,
    pub graduation_threshold_pct: u8,
    pub target_raise: u128,
    pub lp_fee_bps: u16,
    pub host_fee_bps: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPool {
    pub pool_id: String,
}
