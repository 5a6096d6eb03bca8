use actix_web::{web, HttpResponse, Responder};
use log::{info, error};

use crate::models::{CreateLaunchRequest, LaunchPreviewRequest};
use crate::services::LaunchService;

/// Derive the bonding curve for the launch form without touching any vendor
pub async fn preview_launch(
    launch_service: web::Data<LaunchService>,
    payload: web::Json<LaunchPreviewRequest>,
) -> actix_web::Result<impl Responder> {
    info!(
        "Previewing launch: supply {}, threshold {}%, raise {} sats",
        payload.params.initial_supply, payload.params.graduation_threshold_pct, payload.params.target_raise
    );

    match launch_service.preview(&payload) {
        Ok(preview) => Ok(HttpResponse::Ok().json(preview)),
        Err(e) => {
            error!("Launch preview failed: {}", e);
            Err(e.into())
        }
    }
}

pub async fn create_launch(
    launch_service: web::Data<LaunchService>,
    payload: web::Json<CreateLaunchRequest>,
) -> actix_web::Result<impl Responder> {
    info!("Creating launch for {}", payload.ticker);

    match launch_service.launch(payload.into_inner()).await {
        Ok(response) => {
            info!("Launch created: token {} in pool {}", response.token_id, response.pool_id);
            Ok(HttpResponse::Created().json(response))
        }
        Err(e) => {
            error!("Failed to create launch: {}", e);
            Err(e.into())
        }
    }
}
