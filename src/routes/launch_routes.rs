use actix_web::web;
use crate::handlers::launch_handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/launch")
            .route("", web::post().to(launch_handlers::create_launch))
            .route("/preview", web::post().to(launch_handlers::preview_launch))
    );
}
