use actix_web::web;
use log::{info, debug};

use crate::models::{
    ApiError, BalanceResponse, DepositAddressResponse, InvoiceRequest, LightningInvoice,
    TokenBalanceDisplay,
};
use crate::services::Session;
use crate::utils::format::{format_btc, format_token_amount};

pub struct WalletService {
    session: web::Data<Session>,
}

impl WalletService {
    pub fn new(session: web::Data<Session>) -> Self {
        Self { session }
    }

    pub async fn balance(&self) -> Result<BalanceResponse, ApiError> {
        let balance = self.session.wallet().await?.balance().await?;
        debug!("Wallet holds {} sats and {} tokens", balance.sats, balance.tokens.len());

        let display_tokens = balance
            .tokens
            .iter()
            .map(|token| TokenBalanceDisplay {
                token_id: token.token_id.clone(),
                ticker: token.ticker.clone(),
                balance: format_token_amount(token.balance, token.decimals),
            })
            .collect();

        Ok(BalanceResponse {
            display_btc: format_btc(balance.sats),
            display_tokens,
            balance,
        })
    }

    pub async fn deposit_address(&self) -> Result<DepositAddressResponse, ApiError> {
        let address = self.session.wallet().await?.deposit_address().await?;
        Ok(DepositAddressResponse { address })
    }

    pub async fn create_invoice(&self, request: InvoiceRequest) -> Result<LightningInvoice, ApiError> {
        if request.amount_sats == 0 {
            return Err(ApiError::ValidationError("amount_sats must be positive".to_string()));
        }
        let invoice = self
            .session
            .wallet()
            .await?
            .create_invoice(request.amount_sats, request.memo.as_deref())
            .await?;
        info!("Created Lightning invoice for {} sats", invoice.amount_sats);
        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::services::session::testing::*;

    async fn service(wallet: StubWallet) -> WalletService {
        let session = open_session(Arc::new(StubAmm::default()), Arc::new(wallet)).await;
        WalletService::new(web::Data::new(session))
    }

    #[actix_web::test]
    async fn test_balance_display() {
        let balance = service(StubWallet::default()).await.balance().await.unwrap();
        assert_eq!(balance.balance.sats, 150_000);
        assert_eq!(balance.display_btc, "0.00150000 BTC");
        assert_eq!(balance.display_tokens[0].balance, "2.5");
        assert_eq!(balance.display_tokens[0].ticker, "MOON");
    }

    #[actix_web::test]
    async fn test_invoice() {
        let service = service(StubWallet::default()).await;
        let invoice = service
            .create_invoice(InvoiceRequest { amount_sats: 2_100, memo: None })
            .await
            .unwrap();
        assert_eq!(invoice.amount_sats, 2_100);

        let zero = service.create_invoice(InvoiceRequest { amount_sats: 0, memo: None }).await;
        assert!(matches!(zero, Err(ApiError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_wallet_failure_is_vendor_error() {
        let service = service(StubWallet { fail: true, ..Default::default() }).await;
        assert!(matches!(service.deposit_address().await, Err(ApiError::VendorCallFailed(_))));
    }
}
