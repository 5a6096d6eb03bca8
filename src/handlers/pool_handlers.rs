use actix_web::{web, HttpResponse, Responder};
use log::{info, error};

use crate::models::QuoteRequest;
use crate::services::{PoolService, SwapService};

pub async fn list_pools(pool_service: web::Data<PoolService>) -> actix_web::Result<impl Responder> {
    match pool_service.list_pools().await {
        Ok(pools) => Ok(HttpResponse::Ok().json(pools)),
        Err(e) => {
            error!("Failed to list pools: {}", e);
            Err(e.into())
        }
    }
}

pub async fn get_pool(
    pool_service: web::Data<PoolService>,
    pool_id: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    info!("Getting pool {}", pool_id);

    match pool_service.get_pool(&pool_id).await {
        Ok(pool) => Ok(HttpResponse::Ok().json(pool)),
        Err(e) => {
            error!("Failed to get pool {}: {}", pool_id, e);
            Err(e.into())
        }
    }
}

pub async fn quote_swap(
    swap_service: web::Data<SwapService>,
    pool_id: web::Path<String>,
    payload: web::Json<QuoteRequest>,
) -> actix_web::Result<impl Responder> {
    info!("Quoting {} {} -> {} in pool {}", payload.amount_in, payload.asset_in, payload.asset_out, pool_id);

    match swap_service.quote(&pool_id, payload.into_inner()).await {
        Ok(quote) => Ok(HttpResponse::Ok().json(quote)),
        Err(e) => {
            error!("Failed to quote swap in pool {}: {}", pool_id, e);
            Err(e.into())
        }
    }
}

pub async fn execute_swap(
    swap_service: web::Data<SwapService>,
    pool_id: web::Path<String>,
    payload: web::Json<QuoteRequest>,
) -> actix_web::Result<impl Responder> {
    info!("Swapping {} {} -> {} in pool {}", payload.amount_in, payload.asset_in, payload.asset_out, pool_id);

    match swap_service.swap(&pool_id, payload.into_inner()).await {
        Ok(swap) => Ok(HttpResponse::Ok().json(swap)),
        Err(e) => {
            error!("Swap in pool {} failed: {}", pool_id, e);
            Err(e.into())
        }
    }
}
