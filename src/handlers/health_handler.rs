use actix_web::{web, HttpResponse, Responder};
use log::info;
use serde_json::json;

use crate::services::Session;

pub async fn health(session: web::Data<Session>) -> impl Responder {
    info!("Health check");
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "session_open": session.is_open().await,
    }))
}
