use actix_web::web;
use log::info;

use crate::models::{ApiError, Pool, PoolDisplay, PoolResponse};
use crate::services::Session;
use crate::utils::bonding_curve::{graduation_progress_pct, spot_price_sats};
use crate::utils::format::{format_percent, format_price_sats, format_sats, format_token_amount};
use crate::utils::pubkey::parse_pubkey_hex;

/// Pool ids are compressed public keys; anything else is rejected before
/// reaching the AMM.
pub fn parse_pool_id(pool_id: &str) -> Result<String, ApiError> {
    parse_pubkey_hex(pool_id)
        .map_err(|e| ApiError::ValidationError(format!("Invalid pool id {}: {}", pool_id, e)))
}

fn pool_response(pool: Pool) -> PoolResponse {
    let spot_price_sats = spot_price_sats(pool.reserve_a, pool.reserve_b);
    let graduation_progress_pct = pool.curve.as_ref().map(|curve| {
        if curve.graduated {
            100.0
        } else {
            graduation_progress_pct(pool.tokens_sold().unwrap_or(0), curve.threshold)
        }
    });

    let display = PoolDisplay {
        reserve_a: format_token_amount(pool.reserve_a, 0),
        reserve_b: format_sats(pool.reserve_b),
        spot_price: spot_price_sats.map(format_price_sats),
        graduation_progress: graduation_progress_pct.map(format_percent),
    };

    PoolResponse {
        pool,
        spot_price_sats,
        graduation_progress_pct,
        display,
    }
}

pub struct PoolService {
    session: web::Data<Session>,
}

impl PoolService {
    pub fn new(session: web::Data<Session>) -> Self {
        Self { session }
    }

    pub async fn list_pools(&self) -> Result<Vec<PoolResponse>, ApiError> {
        let pools = self.session.amm().await?.list_pools().await?;
        info!("Fetched {} pools", pools.len());
        Ok(pools.into_iter().map(pool_response).collect())
    }

    pub async fn get_pool(&self, pool_id: &str) -> Result<PoolResponse, ApiError> {
        let pool_id = parse_pool_id(pool_id)?;
        match self.session.amm().await?.get_pool(&pool_id).await? {
            Some(pool) => Ok(pool_response(pool)),
            None => Err(ApiError::NotFound(format!("Pool {} not found", pool_id))),
        }
    }
}
