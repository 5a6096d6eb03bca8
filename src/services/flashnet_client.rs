use std::time::Duration;
use async_trait::async_trait;
use log::{info, debug, error};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::RwLock;

use crate::models::{
    CreatePoolParams, CreatedPool, CurveState, ExecuteSwapParams, ExecutedSwap, Pool,
    SimulateSwapParams, SwapSimulation, VendorError,
};
use crate::services::http::send_json;
use crate::traits::AmmApi;
use crate::utils::amount::parse_amount;
use crate::utils::pubkey::parse_pubkey_hex;

const SERVICE: &str = "amm";

/// Client for the AMM REST API
pub struct FlashnetClient {
    base_url: String,
    client: Client,
    access_token: RwLock<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCurveState {
    initial_reserve_a: String,
    graduation_threshold_amount: String,
    #[serde(default)]
    graduated: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPool {
    lp_public_key: String,
    asset_a_address: String,
    asset_b_address: String,
    asset_a_reserve: String,
    asset_b_reserve: String,
    #[serde(default)]
    lp_fee_bps: u16,
    #[serde(default)]
    host_fee_bps: u16,
    #[serde(default)]
    bonding_curve: Option<RawCurveState>,
}

#[derive(Debug, Deserialize)]
struct ListPoolsResponse {
    pools: Vec<RawPool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePoolResponse {
    pool_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSimulation {
    amount_out: String,
    execution_price: f64,
    price_impact_pct: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSwapResult {
    outbound_transfer_id: String,
    amount_out: String,
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

fn non_negative_real(field: &str, value: f64) -> Result<f64, VendorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid(format!("{} must be a non-negative number, got {}", field, value)))
    }
}

impl TryFrom<RawPool> for Pool {
    type Error = VendorError;

    fn try_from(raw: RawPool) -> Result<Self, Self::Error> {
        let pool_id = parse_pubkey_hex(&raw.lp_public_key)
            .map_err(|e| invalid(format!("lpPublicKey: {}", e)))?;

        let curve = match raw.bonding_curve {
            Some(curve) => Some(CurveState {
                initial_reserve_a: amount_field("initialReserveA", &curve.initial_reserve_a)?,
                threshold: amount_field("graduationThresholdAmount", &curve.graduation_threshold_amount)?,
                graduated: curve.graduated,
            }),
            None => None,
        };

        Ok(Pool {
            pool_id,
            asset_a: raw.asset_a_address,
            asset_b: raw.asset_b_address,
            reserve_a: amount_field("assetAReserve", &raw.asset_a_reserve)?,
            reserve_b: amount_field("assetBReserve", &raw.asset_b_reserve)?,
            lp_fee_bps: raw.lp_fee_bps,
            host_fee_bps: raw.host_fee_bps,
            curve,
        })
    }
}

impl TryFrom<RawSimulation> for SwapSimulation {
    type Error = VendorError;

    fn try_from(raw: RawSimulation) -> Result<Self, Self::Error> {
        Ok(SwapSimulation {
            amount_out: amount_field("amountOut", &raw.amount_out)?,
            execution_price: non_negative_real("executionPrice", raw.execution_price)?,
            price_impact_pct: non_negative_real("priceImpactPct", raw.price_impact_pct)?,
        })
    }
}

/// The swap has already settled once the AMM answers, so a fill below the
/// floor is reported on the result rather than turned into an error.
fn executed_swap(raw: RawSwapResult, min_amount_out: u128) -> Result<ExecutedSwap, VendorError> {
    if raw.outbound_transfer_id.is_empty() {
        return Err(invalid("empty outboundTransferId"));
    }
    let amount_out = amount_field("amountOut", &raw.amount_out)?;
    let below_minimum = amount_out < min_amount_out;
    if below_minimum {
        error!(
            "Swap {} filled {} below minimum {}",
            raw.outbound_transfer_id, amount_out, min_amount_out
        );
    }

    Ok(ExecutedSwap {
        swap_id: raw.outbound_transfer_id,
        amount_out,
        below_minimum,
    })
}

impl FlashnetClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, VendorError> {
        info!("AMM client connecting to: {}", base_url);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| VendorError::Request { service: SERVICE, source })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            access_token: RwLock::new(None),
        })
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.access_token.read().await.as_ref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, VendorError> {
        send_json(SERVICE, self.authorized(request).await).await
    }
}

#[async_trait]
impl AmmApi for FlashnetClient {
    async fn authenticate(&self, identity_pubkey: &str) -> Result<(), VendorError> {
        let url = format!("{}/v1/auth", self.base_url);
        info!("Authenticating with AMM as {}", identity_pubkey);

        let auth: AuthResponse = self
            .send(self.client.post(&url).json(&json!({ "publicKey": identity_pubkey })))
            .await?;
        if auth.access_token.is_empty() {
            return Err(invalid("empty access token"));
        }

        *self.access_token.write().await = Some(auth.access_token);
        info!("Successfully authenticated with AMM");
        Ok(())
    }

    async fn list_pools(&self) -> Result<Vec<Pool>, VendorError> {
        let url = format!("{}/v1/pools", self.base_url);
        let response: ListPoolsResponse = self.send(self.client.get(&url)).await?;
        debug!("AMM returned {} pools", response.pools.len());

        response.pools.into_iter().map(Pool::try_from).collect()
    }

    async fn get_pool(&self, pool_id: &str) -> Result<Option<Pool>, VendorError> {
        let url = format!("{}/v1/pools/{}", self.base_url, pool_id);
        info!("Requesting pool {}", pool_id);

        match self.send::<RawPool>(self.client.get(&url)).await {
            Ok(raw) => Pool::try_from(raw).map(Some),
            Err(VendorError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                info!("Pool not found: {}", pool_id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn create_single_sided_pool(&self, params: &CreatePoolParams) -> Result<CreatedPool, VendorError> {
        let url = format!("{}/v1/pools/single-sided", self.base_url);
        info!(
            "Creating single-sided pool for {} with {} tokens",
            params.asset_a, params.asset_a_amount
        );

        let body = json!({
            "poolOwnerPublicKey": params.creator_pubkey,
            "assetAAddress": params.asset_a,
            "assetBAddress": params.asset_b,
            "assetAAmount": params.asset_a_amount.to_string(),
            "virtualReserveA": params.reserves.virtual_reserve_a.to_string(),
            "virtualReserveB": params.reserves.virtual_reserve_b.to_string(),
            "threshold": params.reserves.threshold.to_string(),
            "graduationThresholdPct": params.graduation_threshold_pct,
            "targetRaise": params.target_raise.to_string(),
            "lpFeeRateBps": params.lp_fee_bps,
            "totalHostFeeRateBps": params.host_fee_bps,
        });

        let created: CreatePoolResponse = self.send(self.client.post(&url).json(&body)).await?;
        let pool_id = parse_pubkey_hex(&created.pool_id)
            .map_err(|e| invalid(format!("poolId: {}", e)))?;

        info!("Successfully created pool {}", pool_id);
        Ok(CreatedPool { pool_id })
    }

    async fn simulate_swap(&self, params: &SimulateSwapParams) -> Result<SwapSimulation, VendorError> {
        let url = format!("{}/v1/swap/simulate", self.base_url);
        debug!("Simulating swap of {} on pool {}", params.amount_in, params.pool_id);

        let body = json!({
            "poolId": params.pool_id,
            "assetInAddress": params.asset_in,
            "assetOutAddress": params.asset_out,
            "amountIn": params.amount_in.to_string(),
        });

        let raw: RawSimulation = self.send(self.client.post(&url).json(&body)).await?;
        SwapSimulation::try_from(raw)
    }

    async fn execute_swap(&self, params: &ExecuteSwapParams) -> Result<ExecutedSwap, VendorError> {
        let url = format!("{}/v1/swap", self.base_url);
        info!(
            "Executing swap of {} on pool {} (min out {})",
            params.amount_in, params.pool_id, params.min_amount_out
        );

        let body = json!({
            "userPublicKey": params.user_pubkey,
            "poolId": params.pool_id,
            "assetInAddress": params.asset_in,
            "assetOutAddress": params.asset_out,
            "amountIn": params.amount_in.to_string(),
            "minAmountOut": params.min_amount_out.to_string(),
            "maxSlippageBps": params.max_slippage_bps,
        });

        let raw: RawSwapResult = self.send(self.client.post(&url).json(&body)).await?;
        let executed = executed_swap(raw, params.min_amount_out)?;
        info!("Successfully executed swap {}", executed.swap_id);
        Ok(executed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BTC_ASSET_PUBKEY;

    fn raw_pool_json() -> serde_json::Value {
        json!({
            "lpPublicKey": format!("03{}", "11".repeat(32)),
            "assetAAddress": "btkn1token",
            "assetBAddress": BTC_ASSET_PUBKEY,
            "assetAReserve": "600000",
            "assetBReserve": "41666667",
            "lpFeeBps": 100,
            "bondingCurve": {
                "initialReserveA": "1000000",
                "graduationThresholdAmount": "800000"
            }
        })
    }

    #[test]
    fn test_pool_from_vendor_response() {
        let raw: RawPool = serde_json::from_value(raw_pool_json()).unwrap();
        let pool = Pool::try_from(raw).unwrap();

        assert_eq!(pool.reserve_a, 600_000);
        assert_eq!(pool.reserve_b, 41_666_667);
        assert_eq!(pool.lp_fee_bps, 100);
        assert_eq!(pool.host_fee_bps, 0);
        let curve = pool.curve.unwrap();
        assert_eq!(curve.threshold, 800_000);
        assert!(!curve.graduated);
    }

    #[test]
    fn test_pool_with_malformed_fields_is_rejected() {
        let mut value = raw_pool_json();
        value["assetAReserve"] = json!("6e5");
        let raw: RawPool = serde_json::from_value(value).unwrap();
        assert!(matches!(Pool::try_from(raw), Err(VendorError::InvalidResponse { .. })));

        let mut value = raw_pool_json();
        value["lpPublicKey"] = json!("not-a-key");
        let raw: RawPool = serde_json::from_value(value).unwrap();
        assert!(matches!(Pool::try_from(raw), Err(VendorError::InvalidResponse { .. })));
    }

    #[test]
    fn test_simulation_validation() {
        let ok = RawSimulation {
            amount_out: "39".into(),
            execution_price: 0.039,
            price_impact_pct: 2.5,
        };
        let sim = SwapSimulation::try_from(ok).unwrap();
        assert_eq!(sim.amount_out, 39);

        let negative = RawSimulation {
            amount_out: "39".into(),
            execution_price: 0.039,
            price_impact_pct: -1.0,
        };
        assert!(SwapSimulation::try_from(negative).is_err());

        let nan = RawSimulation {
            amount_out: "39".into(),
            execution_price: f64::NAN,
            price_impact_pct: 0.0,
        };
        assert!(SwapSimulation::try_from(nan).is_err());
    }

    #[test]
    fn test_fill_below_minimum_keeps_swap_id() {
        let raw = RawSwapResult {
            outbound_transfer_id: "transfer-9".into(),
            amount_out: "30".into(),
        };
        let executed = executed_swap(raw, 38).unwrap();
        assert_eq!(executed.swap_id, "transfer-9");
        assert_eq!(executed.amount_out, 30);
        assert!(executed.below_minimum);

        let raw = RawSwapResult {
            outbound_transfer_id: "transfer-10".into(),
            amount_out: "38".into(),
        };
        assert!(!executed_swap(raw, 38).unwrap().below_minimum);

        let raw = RawSwapResult {
            outbound_transfer_id: "transfer-11".into(),
            amount_out: "-1".into(),
        };
        assert!(matches!(executed_swap(raw, 0), Err(VendorError::InvalidResponse { .. })));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = FlashnetClient::new("http://localhost:9999/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
