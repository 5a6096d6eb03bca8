//! Single-sided constant-product bonding curve.
//!
//! Asset A is the launched token and asset B is BTC (sats). The pool starts
//! with the whole initial supply on the A side and a virtual B reserve that
//! sets the opening price. `virtual_reserve_b` is chosen so that buying
//! `threshold` tokens out of the pool costs `target_raise` sats:
//!
//! ```text
//! cost(T) = B * T / (A - T)  =>  B = target_raise * (A - T) / T
//! ```

use crate::consts::{MAX_GRADUATION_THRESHOLD_PCT, MIN_GRADUATION_THRESHOLD_PCT};
use crate::models::{CurveError, LaunchParameters, VirtualReserves};

pub fn derive_virtual_reserves(
    initial_supply: u128,
    graduation_threshold_pct: u8,
    target_raise: u128,
) -> Result<VirtualReserves, CurveError> {
    if initial_supply == 0 {
        return Err(CurveError::InvalidParameters(
            "initial supply must be at least 1".to_string(),
        ));
    }
    if !(MIN_GRADUATION_THRESHOLD_PCT..=MAX_GRADUATION_THRESHOLD_PCT).contains(&graduation_threshold_pct) {
        return Err(CurveError::InvalidParameters(format!(
            "graduation threshold must be between {}% and {}%, got {}%",
            MIN_GRADUATION_THRESHOLD_PCT, MAX_GRADUATION_THRESHOLD_PCT, graduation_threshold_pct
        )));
    }
    if target_raise == 0 {
        return Err(CurveError::InvalidParameters(
            "target raise must be at least 1 sat".to_string(),
        ));
    }

    let threshold = initial_supply
        .checked_mul(u128::from(graduation_threshold_pct))
        .map(|scaled| scaled / 100)
        .ok_or_else(|| CurveError::CalculationFailed("initial supply too large".to_string()))?;

    if threshold == 0 {
        return Err(CurveError::CalculationFailed(format!(
            "supply of {} is too small for a {}% threshold",
            initial_supply, graduation_threshold_pct
        )));
    }

    // pct <= 95 keeps threshold strictly below the supply
    let remaining = initial_supply - threshold;

    let virtual_reserve_b = target_raise
        .checked_mul(remaining)
        .map(|scaled| scaled / threshold)
        .ok_or_else(|| CurveError::CalculationFailed("target raise too large".to_string()))?;

    if virtual_reserve_b == 0 {
        return Err(CurveError::CalculationFailed(format!(
            "target raise of {} sats is too small to price {} tokens",
            target_raise, threshold
        )));
    }

    log::debug!(
        "Derived curve: supply={}, pct={}, raise={} -> reserve_a={}, reserve_b={}, threshold={}",
        initial_supply, graduation_threshold_pct, target_raise,
        initial_supply, virtual_reserve_b, threshold
    );

    Ok(VirtualReserves {
        virtual_reserve_a: initial_supply,
        virtual_reserve_b,
        threshold,
    })
}

pub fn derive(params: &LaunchParameters) -> Result<VirtualReserves, CurveError> {
    derive_virtual_reserves(
        params.initial_supply,
        params.graduation_threshold_pct,
        params.target_raise,
    )
}

/// Sats needed to take `tokens_out` tokens out of a pool holding
/// `reserve_a` tokens against `reserve_b` sats. Rounded up.
pub fn cost_to_buy(reserve_a: u128, reserve_b: u128, tokens_out: u128) -> Result<u128, CurveError> {
    if tokens_out >= reserve_a {
        return Err(CurveError::CalculationFailed(format!(
            "cannot buy {} tokens from a reserve of {}",
            tokens_out, reserve_a
        )));
    }
    let remaining = reserve_a - tokens_out;
    let numerator = reserve_b
        .checked_mul(tokens_out)
        .ok_or_else(|| CurveError::CalculationFailed("reserve product overflow".to_string()))?;

    Ok(numerator / remaining + u128::from(numerator % remaining != 0))
}

/// Price of one base unit of A in sats.
pub fn spot_price_sats(reserve_a: u128, reserve_b: u128) -> Option<f64> {
    if reserve_a == 0 {
        return None;
    }
    Some(reserve_b as f64 / reserve_a as f64)
}

/// Spot price once the curve has sold exactly its threshold.
pub fn graduation_price_sats(reserves: &VirtualReserves) -> Option<f64> {
    let raised = cost_to_buy(reserves.virtual_reserve_a, reserves.virtual_reserve_b, reserves.threshold).ok()?;
    spot_price_sats(
        reserves.virtual_reserve_a - reserves.threshold,
        reserves.virtual_reserve_b.checked_add(raised)?,
    )
}

pub fn graduation_progress_pct(tokens_sold: u128, threshold: u128) -> f64 {
    if threshold == 0 {
        return 100.0;
    }
    ((tokens_sold as f64 / threshold as f64) * 100.0).clamp(0.0, 100.0)
}
