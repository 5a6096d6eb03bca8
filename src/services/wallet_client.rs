use std::time::Duration;
use async_trait::async_trait;
use log::{info, debug};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::Network;
use crate::models::{
    IssueTokenParams, IssuedToken, LightningInvoice, TokenBalance, VendorError, WalletBalance,
    WalletIdentity,
};
use crate::services::http::{send_empty, send_json};
use crate::traits::WalletApi;
use crate::utils::amount::parse_amount;
use crate::utils::pubkey::parse_pubkey_hex;

const SERVICE: &str = "wallet";

/// Client for the wallet service that holds the user's keys.
pub struct WalletClient {
    base_url: String,
    network: Network,
    client: Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectResponse {
    identity_public_key: String,
    network: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTokenBalance {
    token_identifier: String,
    ticker: String,
    #[serde(default)]
    decimals: u8,
    balance: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBalance {
    balance: String,
    #[serde(default)]
    token_balances: Vec<RawTokenBalance>,
}

#[derive(Debug, Deserialize)]
struct DepositAddressResponse {
    address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInvoice {
    encoded_invoice: String,
    amount_sats: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueTokenResponse {
    token_identifier: String,
}

fn invalid(reason: impl Into<String>) -> VendorError {
    VendorError::InvalidResponse {
        service: SERVICE,
        reason: reason.into(),
    }
}

fn amount_field(field: &str, value: &str) -> Result<u128, VendorError> {
    parse_amount(value).map_err(|e| invalid(format!("{}: {}", field, e)))
}

impl TryFrom<RawBalance> for WalletBalance {
    type Error = VendorError;

    fn try_from(raw: RawBalance) -> Result<Self, Self::Error> {
        let tokens = raw
            .token_balances
            .into_iter()
            .map(|token| {
                Ok(TokenBalance {
                    balance: amount_field("tokenBalances.balance", &token.balance)?,
                    token_id: token.token_identifier,
                    ticker: token.ticker,
                    decimals: token.decimals,
                })
            })
            .collect::<Result<Vec<_>, VendorError>>()?;

        Ok(WalletBalance {
            sats: amount_field("balance", &raw.balance)?,
            tokens,
        })
    }
}

impl WalletClient {
    pub fn new(base_url: &str, network: Network, timeout: Duration) -> Result<Self, VendorError> {
        info!("Wallet client connecting to: {} ({})", base_url, network);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| VendorError::Request { service: SERVICE, source })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            network,
            client,
        })
    }

    fn identity_from(&self, raw: ConnectResponse) -> Result<WalletIdentity, VendorError> {
        let network: Network = raw.network.parse().map_err(invalid)?;
        if network != self.network {
            return Err(invalid(format!(
                "wallet is on {} but the gateway is configured for {}",
                network, self.network
            )));
        }
        let identity_pubkey = parse_pubkey_hex(&raw.identity_public_key)
            .map_err(|e| invalid(format!("identityPublicKey: {}", e)))?;

        Ok(WalletIdentity { identity_pubkey, network })
    }
}

#[async_trait]
impl WalletApi for WalletClient {
    async fn connect(&self) -> Result<WalletIdentity, VendorError> {
        let url = format!("{}/v1/wallet/connect", self.base_url);
        let raw: ConnectResponse = send_json(
            SERVICE,
            self.client.post(&url).json(&json!({ "network": self.network })),
        )
        .await?;

        let identity = self.identity_from(raw)?;
        info!("Wallet connected with identity {}", identity.identity_pubkey);
        Ok(identity)
    }

    async fn disconnect(&self) -> Result<(), VendorError> {
        let url = format!("{}/v1/wallet/disconnect", self.base_url);
        send_empty(SERVICE, self.client.post(&url)).await?;
        info!("Wallet disconnected");
        Ok(())
    }

    async fn balance(&self) -> Result<WalletBalance, VendorError> {
        let url = format!("{}/v1/wallet/balance", self.base_url);
        let raw: RawBalance = send_json(SERVICE, self.client.get(&url)).await?;
        WalletBalance::try_from(raw)
    }

    async fn deposit_address(&self) -> Result<String, VendorError> {
        let url = format!("{}/v1/wallet/deposit-address", self.base_url);
        let response: DepositAddressResponse = send_json(SERVICE, self.client.get(&url)).await?;
        if response.address.is_empty() {
            return Err(invalid("empty deposit address"));
        }
        Ok(response.address)
    }

    async fn create_invoice(&self, amount_sats: u128, memo: Option<&str>) -> Result<LightningInvoice, VendorError> {
        let url = format!("{}/v1/wallet/lightning/invoice", self.base_url);
        debug!("Requesting Lightning invoice for {} sats", amount_sats);

        let raw: RawInvoice = send_json(
            SERVICE,
            self.client.post(&url).json(&json!({
                "amountSats": amount_sats.to_string(),
                "memo": memo,
            })),
        )
        .await?;

        let invoiced = amount_field("amountSats", &raw.amount_sats)?;
        if invoiced != amount_sats {
            return Err(invalid(format!(
                "invoice is for {} sats, requested {}",
                invoiced, amount_sats
            )));
        }
        Ok(LightningInvoice {
            invoice: raw.encoded_invoice,
            amount_sats: invoiced,
        })
    }

    async fn issue_token(&self, params: &IssueTokenParams) -> Result<IssuedToken, VendorError> {
        let url = format!("{}/v1/tokens", self.base_url);
        info!("Issuing token {} ({})", params.name, params.ticker);

        let response: IssueTokenResponse = send_json(
            SERVICE,
            self.client.post(&url).json(&json!({
                "tokenName": params.name,
                "tokenTicker": params.ticker,
                "decimals": params.decimals,
                "maxSupply": params.max_supply.to_string(),
            })),
        )
        .await?;

        if response.token_identifier.is_empty() {
            return Err(invalid("empty token identifier"));
        }
        info!("Issued token {}", response.token_identifier);
        Ok(IssuedToken {
            token_id: response.token_identifier,
        })
    }

    async fn mint_tokens(&self, token_id: &str, amount: u128) -> Result<(), VendorError> {
        let url = format!("{}/v1/tokens/{}/mint", self.base_url, token_id);
        info!("Minting {} units of {}", amount, token_id);
        send_empty(
            SERVICE,
            self.client.post(&url).json(&json!({ "amount": amount.to_string() })),
        )
        .await
    }
}
