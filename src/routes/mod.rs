use actix_web::{middleware, web, error::InternalError, HttpResponse, ResponseError};

use crate::handlers;
use crate::models::ApiError;

mod launch_routes;
mod pool_routes;
mod wallet_routes;

pub use launch_routes::configure as configure_launch_routes;
pub use pool_routes::configure as configure_pool_routes;
pub use wallet_routes::configure as configure_wallet_routes;

/// Malformed bodies get the same error shape as every other validation failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response: HttpResponse = ApiError::ValidationError(err.to_string()).error_response();
        InternalError::from_response(err, response).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(middleware::Logger::default())
            .app_data(json_config())
            .route("/health", web::get().to(handlers::health))
            .configure(configure_launch_routes)
            .configure(configure_pool_routes)
            .configure(configure_wallet_routes),
    );
}
