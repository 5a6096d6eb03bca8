use actix_web::web;
use log::{info, error, debug};

use crate::config::AppConfig;
use crate::consts::{
    BTC_ASSET_PUBKEY, MAX_TICKER_LEN, MAX_TOKEN_DECIMALS, MAX_TOKEN_NAME_LEN, MAX_TOTAL_FEE_BPS,
};
use crate::models::{
    ApiError, CreateLaunchRequest, CreateLaunchResponse, CreatePoolParams, CurveError,
    IssueTokenParams, LaunchParameters, LaunchPreview, LaunchPreviewDisplay, LaunchPreviewRequest,
};
use crate::services::Session;
use crate::utils::bonding_curve::{self, cost_to_buy, graduation_price_sats, spot_price_sats};
use crate::utils::format::{format_price_sats, format_sats, format_token_amount};

/// Derives the curve for `params` and renders the preview shown before launch.
///
/// Prices are sats per base unit; the display strings quote them per whole
/// token (`10^decimals` base units).
pub fn build_preview(params: &LaunchParameters, decimals: u8) -> Result<LaunchPreview, CurveError> {
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(CurveError::InvalidParameters(format!(
            "decimals must be at most {}, got {}",
            MAX_TOKEN_DECIMALS, decimals
        )));
    }

    let reserves = bonding_curve::derive(params)?;
    let raise_at_graduation = cost_to_buy(
        reserves.virtual_reserve_a,
        reserves.virtual_reserve_b,
        reserves.threshold,
    )?;
    let initial_price_sats = spot_price_sats(reserves.virtual_reserve_a, reserves.virtual_reserve_b);
    let graduation_price_sats = graduation_price_sats(&reserves);

    let per_token = 10f64.powi(i32::from(decimals));
    let display = LaunchPreviewDisplay {
        initial_supply: format_token_amount(params.initial_supply, decimals),
        threshold: format_token_amount(reserves.threshold, decimals),
        target_raise: format_sats(params.target_raise),
        raise_at_graduation: format_sats(raise_at_graduation),
        initial_price: initial_price_sats.map(|p| format_price_sats(p * per_token)),
        graduation_price: graduation_price_sats.map(|p| format_price_sats(p * per_token)),
    };

    debug!(
        "Preview for supply {} at {}%: raise at graduation {} sats",
        params.initial_supply, params.graduation_threshold_pct, raise_at_graduation
    );

    Ok(LaunchPreview {
        params: *params,
        reserves,
        raise_at_graduation,
        initial_price_sats,
        graduation_price_sats,
        display,
    })
}

fn validate_token_metadata(name: &str, ticker: &str, decimals: u8) -> Result<(String, String), ApiError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_TOKEN_NAME_LEN {
        return Err(ApiError::ValidationError(format!(
            "Token name must be 1-{} characters",
            MAX_TOKEN_NAME_LEN
        )));
    }

    let ticker = ticker.trim().to_ascii_uppercase();
    if ticker.is_empty()
        || ticker.len() > MAX_TICKER_LEN
        || !ticker.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(ApiError::ValidationError(format!(
            "Ticker must be 1-{} letters or digits",
            MAX_TICKER_LEN
        )));
    }

    if decimals > MAX_TOKEN_DECIMALS {
        return Err(ApiError::ValidationError(format!(
            "Decimals must be at most {}",
            MAX_TOKEN_DECIMALS
        )));
    }

    Ok((name.to_string(), ticker))
}

pub struct LaunchService {
    session: web::Data<Session>,
    default_lp_fee_bps: u16,
    default_host_fee_bps: u16,
}

impl LaunchService {
    pub fn new(session: web::Data<Session>, config: &AppConfig) -> Self {
        Self {
            session,
            default_lp_fee_bps: config.default_lp_fee_bps,
            default_host_fee_bps: config.default_host_fee_bps,
        }
    }

    pub fn preview(&self, request: &LaunchPreviewRequest) -> Result<LaunchPreview, ApiError> {
        build_preview(&request.params, request.decimals).map_err(ApiError::from)
    }

    /// Issues the token, mints the full supply to the connected wallet and
    /// deposits it into a single-sided bonding-curve pool.
    pub async fn launch(&self, request: CreateLaunchRequest) -> Result<CreateLaunchResponse, ApiError> {
        let (name, ticker) = validate_token_metadata(&request.name, &request.ticker, request.decimals)?;

        let lp_fee_bps = request.lp_fee_bps.unwrap_or(self.default_lp_fee_bps);
        let host_fee_bps = request.host_fee_bps.unwrap_or(self.default_host_fee_bps);
        if u32::from(lp_fee_bps) + u32::from(host_fee_bps) > u32::from(MAX_TOTAL_FEE_BPS) {
            return Err(ApiError::ValidationError(format!(
                "LP and host fees together must be at most {} bps",
                MAX_TOTAL_FEE_BPS
            )));
        }

        // nothing is issued unless the curve can be derived
        let reserves = bonding_curve::derive(&request.params)?;
        let identity = self.session.identity().await?;
        let wallet = self.session.wallet().await?;
        let amm = self.session.amm().await?;

        info!("Launching {} ({}) with supply {}", name, ticker, request.params.initial_supply);
        let issued = wallet
            .issue_token(&IssueTokenParams {
                name,
                ticker: ticker.clone(),
                decimals: request.decimals,
                max_supply: request.params.initial_supply,
            })
            .await?;

        wallet
            .mint_tokens(&issued.token_id, request.params.initial_supply)
            .await
            .map_err(|e| {
                error!("Token {} issued but minting failed: {}", issued.token_id, e);
                e
            })?;

        let created = amm
            .create_single_sided_pool(&CreatePoolParams {
                creator_pubkey: identity.identity_pubkey,
                asset_a: issued.token_id.clone(),
                asset_b: BTC_ASSET_PUBKEY.to_string(),
                asset_a_amount: request.params.initial_supply,
                reserves,
                graduation_threshold_pct: request.params.graduation_threshold_pct,
                target_raise: request.params.target_raise,
                lp_fee_bps,
                host_fee_bps,
            })
            .await
            .map_err(|e| {
                error!("Token {} minted but pool creation failed: {}", issued.token_id, e);
                e
            })?;

        info!("Launched {} in pool {}", issued.token_id, created.pool_id);
        Ok(CreateLaunchResponse {
            token_id: issued.token_id,
            pool_id: created.pool_id,
            ticker,
            reserves,
            lp_fee_bps,
            host_fee_bps,
        })
    }
}
