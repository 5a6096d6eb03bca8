use actix_web::{web, HttpResponse, Responder};
use log::{info, error};

use crate::models::InvoiceRequest;
use crate::services::WalletService;

pub async fn get_balance(wallet_service: web::Data<WalletService>) -> actix_web::Result<impl Responder> {
    match wallet_service.balance().await {
        Ok(balance) => Ok(HttpResponse::Ok().json(balance)),
        Err(e) => {
            error!("Failed to fetch wallet balance: {}", e);
            Err(e.into())
        }
    }
}

pub async fn get_deposit_address(wallet_service: web::Data<WalletService>) -> actix_web::Result<impl Responder> {
    match wallet_service.deposit_address().await {
        Ok(address) => Ok(HttpResponse::Ok().json(address)),
        Err(e) => {
            error!("Failed to fetch deposit address: {}", e);
            Err(e.into())
        }
    }
}

/// Lightning invoice creation is passed through to the wallet service
pub async fn create_invoice(
    wallet_service: web::Data<WalletService>,
    payload: web::Json<InvoiceRequest>,
) -> actix_web::Result<impl Responder> {
    info!("Creating invoice for {} sats", payload.amount_sats);

    match wallet_service.create_invoice(payload.into_inner()).await {
        Ok(invoice) => Ok(HttpResponse::Created().json(invoice)),
        Err(e) => {
            error!("Failed to create invoice: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App, http::StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::handlers::testing::app_data;
    use crate::routes;
    use crate::services::session::testing::*;

    #[actix_web::test]
    async fn test_balance_endpoint() {
        let session = open_session(Arc::new(StubAmm::default()), Arc::new(StubWallet::default())).await;
        let app = test::init_service(App::new().configure(app_data(session)).configure(routes::configure)).await;

        let req = test::TestRequest::get().uri("/api/wallet/balance").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["sats"], "150000");
        assert_eq!(body["display_btc"], "0.00150000 BTC");
        assert_eq!(body["tokens"][0]["balance"], "2500000");
    }

    #[actix_web::test]
    async fn test_invoice_endpoint() {
        let session = open_session(Arc::new(StubAmm::default()), Arc::new(StubWallet::default())).await;
        let app = test::init_service(App::new().configure(app_data(session)).configure(routes::configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/wallet/invoice")
            .set_json(json!({ "amount_sats": "2100", "memo": "coffee" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["amount_sats"], "2100");
    }
}
