use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result};
use crate::shared::types::ApiErrorBody;

/// HTTP transport shared by every feature client.
///
/// One `reqwest::Client` with the configured timeouts; the per-feature API
/// traits are implemented on top of it in each feature's `clients` module.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| AppError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http_client.get(self.config.endpoint(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http_client.post(self.config.endpoint(path))
    }

    /// Send a request and decode a JSON success body
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<T> {
        let (status, body) = self.execute(request, operation).await?;
        decode_response(status, &body, operation)
    }

    /// Send a request whose success body is free text (or empty)
    pub(crate) async fn send_text(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<String> {
        let (status, body) = self.execute(request, operation).await?;
        if status.is_success() {
            return Ok(body);
        }
        Err(classify_failure(status, &body, operation))
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<(StatusCode, String)> {
        tracing::debug!("Sending {} request", operation);

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e, operation))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, operation))?;

        tracing::debug!("{} answered HTTP {}", operation, status);
        Ok((status, body))
    }
}

/// Map a response to the typed payload or to one of the error kinds
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    operation: &str,
) -> Result<T> {
    if !status.is_success() {
        return Err(classify_failure(status, body, operation));
    }

    serde_json::from_str::<T>(body).map_err(|e| {
        tracing::error!("Failed to parse {} response: {}", operation, e);
        AppError::Network(format!("Unreadable {} response: {}", operation, e))
    })
}

/// 401 ends the session; every other non-2xx status is a server rejection
pub(crate) fn classify_failure(status: StatusCode, body: &str, operation: &str) -> AppError {
    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!("{} rejected with HTTP 401, session expired", operation);
        return AppError::SessionExpired;
    }

    if status.is_server_error() {
        tracing::error!("{} failed: HTTP {} - {}", operation, status, body);
    } else {
        tracing::warn!("{} rejected: HTTP {} - {}", operation, status, body);
    }

    AppError::rejected(status.as_u16(), server_message(body))
}

/// Pull a human readable message out of an error body
fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(text)) => Some(text),
        Ok(value) => serde_json::from_value::<ApiErrorBody>(value)
            .ok()
            .and_then(ApiErrorBody::into_message),
        // Spring returns bare strings such as "Error: Username is already taken!"
        Err(_) if !trimmed.starts_with('<') => Some(trimmed.to_string()),
        Err(_) => None,
    }
}

fn transport_error(e: reqwest::Error, operation: &str) -> AppError {
    if e.is_timeout() {
        tracing::error!("{} timed out: {}", operation, e);
        return AppError::Network(format!("{} timed out", operation));
    }

    tracing::error!("{} failed: {}", operation, e);
    AppError::Network(format!("{} failed: {}", operation, e))
}
