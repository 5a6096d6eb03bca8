use actix_web::web;
use crate::handlers::pool_handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pools")
            .route("", web::get().to(pool_handlers::list_pools))
            .route("/{pool_id}", web::get().to(pool_handlers::get_pool))
            .route("/{pool_id}/quote", web::post().to(pool_handlers::quote_swap))
            .route("/{pool_id}/swap", web::post().to(pool_handlers::execute_swap))
    );
}
