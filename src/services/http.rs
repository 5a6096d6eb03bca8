use log::error;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::models::VendorError;

async fn checked(service: &'static str, request: RequestBuilder) -> Result<Response, VendorError> {
    let response = request.send().await.map_err(|source| {
        error!("Request to {} failed: {:?}", service, source);
        VendorError::Request { service, source }
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unable to read error response".to_string());
    error!("{} returned HTTP {} - {}", service, status, body);
    Err(VendorError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}

/// Sends `request` and decodes a JSON body; non-2xx becomes `VendorError::Status`.
pub async fn send_json<T: DeserializeOwned>(service: &'static str, request: RequestBuilder) -> Result<T, VendorError> {
    checked(service, request)
        .await?
        .json::<T>()
        .await
        .map_err(|e| VendorError::InvalidResponse {
            service,
            reason: format!("failed to deserialize body: {}", e),
        })
}

pub async fn send_empty(service: &'static str, request: RequestBuilder) -> Result<(), VendorError> {
    checked(service, request).await.map(|_| ())
}
