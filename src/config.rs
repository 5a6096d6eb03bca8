use std::{env, fmt, str::FromStr, time::Duration};
use serde::Serialize;
use thiserror::Error;

use crate::consts::{BPS_DENOMINATOR, MAX_TOTAL_FEE_BPS};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Regtest,
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "regtest" => Ok(Network::Regtest),
            other => Err(format!("unknown network {}", other)),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Regtest => write!(f, "regtest"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub flashnet_api_url: String,
    pub wallet_service_url: String,
    pub network: Network,
    pub request_timeout: Duration,
    pub default_max_slippage_bps: u16,
    pub default_lp_fee_bps: u16,
    pub default_host_fee_bps: u16,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up `.env`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let config = AppConfig {
            host: var("SERVER_HOST", "0.0.0.0"),
            port: parse_var("SERVER_PORT", var("SERVER_PORT", "8080"))?,
            log_level: var("LOG_LEVEL", "info"),
            flashnet_api_url: trim_url(var("FLASHNET_API_URL", "https://api.amm.flashnet.xyz")),
            wallet_service_url: trim_url(var("WALLET_SERVICE_URL", "http://localhost:8081")),
            network: parse_var("NETWORK", var("NETWORK", "mainnet"))?,
            request_timeout: Duration::from_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                var("REQUEST_TIMEOUT_SECS", "30"),
            )?),
            default_max_slippage_bps: parse_var(
                "DEFAULT_MAX_SLIPPAGE_BPS",
                var("DEFAULT_MAX_SLIPPAGE_BPS", "100"),
            )?,
            default_lp_fee_bps: parse_var("DEFAULT_LP_FEE_BPS", var("DEFAULT_LP_FEE_BPS", "100"))?,
            default_host_fee_bps: parse_var("DEFAULT_HOST_FEE_BPS", var("DEFAULT_HOST_FEE_BPS", "0"))?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_max_slippage_bps > BPS_DENOMINATOR {
            return Err(ConfigError::InvalidValue {
                name: "DEFAULT_MAX_SLIPPAGE_BPS",
                value: self.default_max_slippage_bps.to_string(),
                reason: format!("must be at most {}", BPS_DENOMINATOR),
            });
        }
        let total_fee = u32::from(self.default_lp_fee_bps) + u32::from(self.default_host_fee_bps);
        if total_fee > u32::from(MAX_TOTAL_FEE_BPS) {
            return Err(ConfigError::InvalidValue {
                name: "DEFAULT_LP_FEE_BPS",
                value: self.default_lp_fee_bps.to_string(),
                reason: format!("LP and host fees together must be at most {} bps", MAX_TOTAL_FEE_BPS),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
        name,
        value: value.clone(),
        reason: e.to_string(),
    })
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.default_max_slippage_bps, 100);
        assert_eq!(config.flashnet_api_url, "https://api.amm.flashnet.xyz");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SERVER_PORT", "9000"),
            ("NETWORK", "REGTEST"),
            ("WALLET_SERVICE_URL", "http://wallet:7000/"),
            ("DEFAULT_MAX_SLIPPAGE_BPS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.network, Network::Regtest);
        assert_eq!(config.wallet_service_url, "http://wallet:7000");
        assert_eq!(config.default_max_slippage_bps, 250);
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));

        assert!(AppConfig::from_lookup(lookup(&[("NETWORK", "testnet")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("DEFAULT_MAX_SLIPPAGE_BPS", "10001")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("DEFAULT_LP_FEE_BPS", "900"), ("DEFAULT_HOST_FEE_BPS", "200")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("REQUEST_TIMEOUT_SECS", "0")])).is_err());
    }
}
