use async_trait::async_trait;

use crate::models::{
    CreatePoolParams, CreatedPool, ExecuteSwapParams, ExecutedSwap, IssueTokenParams, IssuedToken,
    LightningInvoice, Pool, SimulateSwapParams, SwapSimulation, VendorError, WalletBalance,
    WalletIdentity,
};

/// The AMM operations the gateway delegates to the vendor.
#[async_trait]
pub trait AmmApi: Send + Sync {
    async fn authenticate(&self, identity_pubkey: &str) -> Result<(), VendorError>;

    async fn list_pools(&self) -> Result<Vec<Pool>, VendorError>;

    /// `Ok(None)` when the pool does not exist.
    async fn get_pool(&self, pool_id: &str) -> Result<Option<Pool>, VendorError>;

    async fn create_single_sided_pool(&self, params: &CreatePoolParams) -> Result<CreatedPool, VendorError>;

    async fn simulate_swap(&self, params: &SimulateSwapParams) -> Result<SwapSimulation, VendorError>;

    async fn execute_swap(&self, params: &ExecuteSwapParams) -> Result<ExecutedSwap, VendorError>;
}

/// The wallet operations the gateway delegates to the vendor.
/// Keys never leave the wallet service.
#[async_trait]
pub trait WalletApi: Send + Sync {
    async fn connect(&self) -> Result<WalletIdentity, VendorError>;

    async fn disconnect(&self) -> Result<(), VendorError>;

    async fn balance(&self) -> Result<WalletBalance, VendorError>;

    async fn deposit_address(&self) -> Result<String, VendorError>;

    async fn create_invoice(&self, amount_sats: u128, memo: Option<&str>) -> Result<LightningInvoice, VendorError>;

    async fn issue_token(&self, params: &IssueTokenParams) -> Result<IssuedToken, VendorError>;

    async fn mint_tokens(&self, token_id: &str, amount: u128) -> Result<(), VendorError>;
}
