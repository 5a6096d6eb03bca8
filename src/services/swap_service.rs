use actix_web::web;
use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::consts::BTC_ASSET_PUBKEY;
use crate::models::{
    ApiError, ExecuteSwapParams, QuoteDisplay, QuoteError, QuoteRequest, QuoteResponse,
    SimulateSwapParams, SwapQuoteRequest, SwapResponse, SwapSimulation,
};
use crate::services::pool_service::parse_pool_id;
use crate::services::Session;
use crate::utils::format::{format_percent, format_sats, format_token_amount};
use crate::utils::slippage::{self, compute_min_amount_out};

/// A vendor simulation checked against the local slippage bound.
struct PreparedSwap {
    pool_id: String,
    request: QuoteRequest,
    max_slippage_bps: u16,
    simulation: SwapSimulation,
    min_amount_out: u128,
    price_impact_pct: Option<f64>,
}

fn display_amount(asset: &str, amount: u128) -> String {
    if asset == BTC_ASSET_PUBKEY {
        format_sats(amount)
    } else {
        format_token_amount(amount, 0)
    }
}

impl PreparedSwap {
    fn display(&self, amount_out: u128) -> QuoteDisplay {
        QuoteDisplay {
            amount_in: display_amount(&self.request.asset_in, self.request.amount_in),
            amount_out: display_amount(&self.request.asset_out, amount_out),
            min_amount_out: display_amount(&self.request.asset_out, self.min_amount_out),
            price_impact: self
                .price_impact_pct
                .map(format_percent)
                .unwrap_or_else(|| "n/a".to_string()),
        }
    }
}

pub struct SwapService {
    session: web::Data<Session>,
    default_max_slippage_bps: u16,
}

impl SwapService {
    pub fn new(session: web::Data<Session>, config: &AppConfig) -> Self {
        Self {
            session,
            default_max_slippage_bps: config.default_max_slippage_bps,
        }
    }

    async fn prepare(&self, pool_id: &str, request: QuoteRequest) -> Result<PreparedSwap, ApiError> {
        let pool_id = parse_pool_id(pool_id)?;
        let max_slippage_bps = request.max_slippage_bps.unwrap_or(self.default_max_slippage_bps);
        if request.amount_in == 0 {
            return Err(ApiError::ValidationError("amount_in must be positive".to_string()));
        }
        if request.asset_in == request.asset_out {
            return Err(ApiError::ValidationError("asset_in and asset_out must differ".to_string()));
        }
        // rejects an out-of-range bound before any vendor round-trip
        compute_min_amount_out(0, max_slippage_bps)?;

        let amm = self.session.amm().await?;
        let pool = amm
            .get_pool(&pool_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Pool {} not found", pool_id)))?;
        let (reserve_in, reserve_out) = pool
            .oriented_reserves(&request.asset_in, &request.asset_out)
            .ok_or_else(|| {
                ApiError::ValidationError(format!("Pool {} does not trade this pair", pool_id))
            })?;

        let simulation = amm
            .simulate_swap(&SimulateSwapParams {
                pool_id: pool_id.clone(),
                asset_in: request.asset_in.clone(),
                asset_out: request.asset_out.clone(),
                amount_in: request.amount_in,
            })
            .await?;

        let quote_request = SwapQuoteRequest {
            amount_in: request.amount_in,
            reserve_in,
            reserve_out,
            max_slippage_bps,
        };
        let (min_amount_out, price_impact_pct) = match slippage::quote(&quote_request, simulation.amount_out) {
            Ok(result) => (result.min_amount_out, Some(result.price_impact_pct)),
            Err(QuoteError::DivisionByZero(reason)) => {
                warn!("Price impact undefined for pool {}: {}", pool_id, reason);
                (compute_min_amount_out(simulation.amount_out, max_slippage_bps)?, None)
            }
            Err(e) => return Err(e.into()),
        };

        Ok(PreparedSwap {
            pool_id,
            request,
            max_slippage_bps,
            simulation,
            min_amount_out,
            price_impact_pct,
        })
    }

    pub async fn quote(&self, pool_id: &str, request: QuoteRequest) -> Result<QuoteResponse, ApiError> {
        let prepared = self.prepare(pool_id, request).await?;
        let display = prepared.display(prepared.simulation.amount_out);

        info!(
            "Quoted {} -> {} in pool {} (min {})",
            prepared.request.amount_in, prepared.simulation.amount_out, prepared.pool_id, prepared.min_amount_out
        );
        Ok(QuoteResponse {
            quote_id: Uuid::new_v4(),
            quoted_at: Utc::now(),
            pool_id: prepared.pool_id,
            asset_in: prepared.request.asset_in,
            asset_out: prepared.request.asset_out,
            amount_in: prepared.request.amount_in,
            amount_out: prepared.simulation.amount_out,
            min_amount_out: prepared.min_amount_out,
            max_slippage_bps: prepared.max_slippage_bps,
            price_impact_pct: prepared.price_impact_pct,
            vendor_price_impact_pct: prepared.simulation.price_impact_pct,
            execution_price: prepared.simulation.execution_price,
            display,
        })
    }

    /// Re-quotes and executes with the fresh `min_amount_out` as the floor.
    pub async fn swap(&self, pool_id: &str, request: QuoteRequest) -> Result<SwapResponse, ApiError> {
        let prepared = self.prepare(pool_id, request).await?;
        let identity = self.session.identity().await?;

        let executed = self
            .session
            .amm()
            .await?
            .execute_swap(&ExecuteSwapParams {
                pool_id: prepared.pool_id.clone(),
                user_pubkey: identity.identity_pubkey,
                asset_in: prepared.request.asset_in.clone(),
                asset_out: prepared.request.asset_out.clone(),
                amount_in: prepared.request.amount_in,
                min_amount_out: prepared.min_amount_out,
                max_slippage_bps: prepared.max_slippage_bps,
            })
            .await?;

        if executed.below_minimum {
            warn!(
                "Swap {} in pool {} filled {} below minimum {}",
                executed.swap_id, prepared.pool_id, executed.amount_out, prepared.min_amount_out
            );
        } else {
            info!("Swap {} filled {} in pool {}", executed.swap_id, executed.amount_out, prepared.pool_id);
        }
        let display = prepared.display(executed.amount_out);
        Ok(SwapResponse {
            swap_id: executed.swap_id,
            pool_id: prepared.pool_id,
            amount_in: prepared.request.amount_in,
            amount_out: executed.amount_out,
            min_amount_out: prepared.min_amount_out,
            below_minimum: executed.below_minimum,
            display,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::services::session::testing::*;

    fn buy(amount_in: u128, max_slippage_bps: Option<u16>) -> QuoteRequest {
        QuoteRequest {
            asset_in: BTC_ASSET_PUBKEY.to_string(),
            asset_out: TOKEN_ID.to_string(),
            amount_in,
            max_slippage_bps,
        }
    }

    async fn service(amm: Arc<StubAmm>) -> SwapService {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let session = open_session(amm, Arc::new(StubWallet::default())).await;
        SwapService::new(web::Data::new(session), &config)
    }

    #[actix_web::test]
    async fn test_quote_applies_slippage_and_impact() {
        let service = service(Arc::new(StubAmm::default())).await;
        let quote = service.quote(POOL_ID, buy(1_000, None)).await.unwrap();

        // 1000 sats at 25 sats/token would give 40, the pool fills 39
        assert_eq!(quote.amount_out, 39);
        assert_eq!(quote.min_amount_out, 38);
        assert_eq!(quote.max_slippage_bps, 100);
        assert!((quote.price_impact_pct.unwrap() - 2.5).abs() < 1e-9);
        assert_eq!(quote.display.amount_in, "1,000 sats");
        assert_eq!(quote.display.price_impact, "2.50%");
    }

    #[actix_web::test]
    async fn test_quote_with_empty_input_reserve_has_no_impact() {
        let service = service(Arc::new(StubAmm { reserve_in_zero: true, ..Default::default() })).await;
        let quote = service.quote(POOL_ID, buy(1_000, Some(0))).await.unwrap();
        assert_eq!(quote.price_impact_pct, None);
        assert_eq!(quote.min_amount_out, 39);
        assert_eq!(quote.display.price_impact, "n/a");
    }

    #[actix_web::test]
    async fn test_quote_rejects_bad_input() {
        let service = service(Arc::new(StubAmm::default())).await;

        assert!(matches!(service.quote(POOL_ID, buy(0, None)).await, Err(ApiError::ValidationError(_))));
        assert!(matches!(
            service.quote(POOL_ID, buy(1_000, Some(10_001))).await,
            Err(ApiError::ValidationError(_))
        ));

        let mut wrong_pair = buy(1_000, None);
        wrong_pair.asset_out = "btkn1other".to_string();
        assert!(matches!(service.quote(POOL_ID, wrong_pair).await, Err(ApiError::ValidationError(_))));

        let unknown = format!("02{}", "33".repeat(32));
        assert!(matches!(service.quote(&unknown, buy(1_000, None)).await, Err(ApiError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_out_of_range_slippage_rejected_before_vendor_call() {
        let service = service(Arc::new(StubAmm { fail: true, ..Default::default() })).await;
        let result = service.quote(POOL_ID, buy(1_000, Some(20_000))).await;
        assert!(matches!(result, Err(ApiError::ValidationError(_))));

        let result = service.swap(POOL_ID, buy(1_000, Some(20_000))).await;
        assert!(matches!(result, Err(ApiError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_swap_filled_below_minimum_is_reported() {
        let amm = Arc::new(StubAmm { executed_out: Some(30), ..Default::default() });
        let service = service(amm.clone()).await;

        let swap = service.swap(POOL_ID, buy(1_000, Some(100))).await.unwrap();
        assert_eq!(swap.swap_id, "transfer-1");
        assert_eq!(swap.amount_out, 30);
        assert_eq!(swap.min_amount_out, 38);
        assert!(swap.below_minimum);
        assert_eq!(amm.executed.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_swap_executes_with_min_amount_out() {
        let amm = Arc::new(StubAmm::default());
        let service = service(amm.clone()).await;

        let swap = service.swap(POOL_ID, buy(1_000, Some(100))).await.unwrap();
        assert_eq!(swap.swap_id, "transfer-1");
        assert_eq!(swap.amount_out, 39);
        assert!(!swap.below_minimum);

        let executed = amm.executed.lock().unwrap();
        assert_eq!(executed.len(), 1);
        assert_eq!(executed[0].min_amount_out, 38);
        assert_eq!(executed[0].user_pubkey, IDENTITY);
    }
}
