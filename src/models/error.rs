use serde::Serialize;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;
use thiserror::Error;

use crate::services::SessionError;
use crate::utils::amount::AmountError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Failures of the bonding-curve deriver and its helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("Invalid launch parameters: {0}")]
    InvalidParameters(String),

    #[error("Curve calculation failed: {0}")]
    CalculationFailed(String),
}

/// Failures of the slippage and price-impact calculator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Invalid quote parameters: {0}")]
    InvalidParameters(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),
}

/// A call to the AMM or wallet service did not produce a usable answer.
#[derive(Error, Debug)]
pub enum VendorError {
    #[error("Request to {service} failed: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {service}: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },
}

#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),
    PreviewUnavailable(String),
    NotFound(String),
    VendorCallFailed(String),
    SessionClosed,
    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::PreviewUnavailable(msg) => write!(f, "Preview unavailable: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::VendorCallFailed(msg) => write!(f, "Vendor call failed: {}", msg),
            ApiError::SessionClosed => write!(f, "Wallet session is not connected"),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CurveError> for ApiError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::InvalidParameters(msg) => ApiError::ValidationError(msg),
            CurveError::CalculationFailed(msg) => ApiError::PreviewUnavailable(msg),
        }
    }
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::InvalidParameters(msg) => ApiError::ValidationError(msg),
            QuoteError::DivisionByZero(msg) => ApiError::PreviewUnavailable(msg),
        }
    }
}

impl From<VendorError> for ApiError {
    fn from(err: VendorError) -> Self {
        ApiError::VendorCallFailed(err.to_string())
    }
}

impl From<AmountError> for ApiError {
    fn from(err: AmountError) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Closed => ApiError::SessionClosed,
            SessionError::Vendor(e) => e.into(),
        }
    }
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::PreviewUnavailable(_) => "PREVIEW_UNAVAILABLE",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::VendorCallFailed(_) => "VENDOR_CALL_FAILED",
            ApiError::SessionClosed => "SESSION_CLOSED",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = |message: String, details: Option<String>| ErrorResponse {
            code: self.code().to_string(),
            message,
            details,
        };

        match self {
            ApiError::ValidationError(_) => {
                HttpResponse::BadRequest().json(body(self.to_string(), None))
            }
            ApiError::PreviewUnavailable(_) => {
                HttpResponse::UnprocessableEntity().json(body(self.to_string(), None))
            }
            ApiError::NotFound(_) => {
                HttpResponse::NotFound().json(body(self.to_string(), None))
            }
            ApiError::VendorCallFailed(msg) => {
                // upstream failures are surfaced as non-fatal notifications
                HttpResponse::BadGateway().json(body(
                    "Vendor call failed".to_string(),
                    Some(msg.clone()),
                ))
            }
            ApiError::SessionClosed => {
                HttpResponse::ServiceUnavailable().json(body(self.to_string(), None))
            }
            ApiError::InternalError(_) => {
                HttpResponse::InternalServerError().json(body(
                    "Internal server error".to_string(),
                    None,
                ))
            }
        }
    }
}
