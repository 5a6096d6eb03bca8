use actix_web::web;
use crate::handlers::wallet_handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wallet")
            .route("/balance", web::get().to(wallet_handlers::get_balance))
            .route("/deposit-address", web::get().to(wallet_handlers::get_deposit_address))
            .route("/invoice", web::post().to(wallet_handlers::create_invoice))
    );
}
