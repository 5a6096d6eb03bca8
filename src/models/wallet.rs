use serde::{Deserialize, Serialize};
use crate::config::Network;
use crate::utils::amount::string_amount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletIdentity {
    pub identity_pubkey: String,
    pub network: Network,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenBalance {
    pub token_id: String,
    pub ticker: String,
    pub decimals: u8,
    #[serde(with = "string_amount")]
    pub balance: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletBalance {
    #[serde(with = "string_amount")]
    pub sats: u128,
    pub tokens: Vec<TokenBalance>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenBalanceDisplay {
    pub token_id: String,
    pub ticker: String,
    pub balance: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    #[serde(flatten)]
    pub balance: WalletBalance,
    pub display_btc: String,
    pub display_tokens: Vec<TokenBalanceDisplay>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositAddressResponse {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceRequest {
    #[serde(with = "string_amount")]
    pub amount_sats: u128,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightningInvoice {
    pub invoice: String,
    #[serde(with = "string_amount")]
    pub amount_sats: u128,
}

/// Token issuance inputs forwarded to the wallet service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTokenParams {
    pub name: String,
    pub ticker: String,
    pub decimals: u8,
    pub max_supply: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token_id: String,
}
