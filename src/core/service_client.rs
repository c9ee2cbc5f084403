// src/core/service_client.rs
//! Retrying HTTP service client shared by every domain client

use std::sync::Arc;

use anyhow::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::core::config_manager::AppConfig;
use crate::core::retry::{AttemptFailure, RetryPolicy};
use crate::core::service_registry::{Endpoint, ServiceName, ServiceRegistry};
use crate::core::transport::{HttpTransport, OutgoingRequest, RawResponse, ReqwestTransport};
use crate::error::ClientError;

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

#[derive(Clone)]
pub struct ServiceClient {
    transport: Arc<dyn HttpTransport>,
    registry: Arc<ServiceRegistry>,
    policy: RetryPolicy,
    bearer_token: Option<String>,
}

impl ServiceClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        registry: Arc<ServiceRegistry>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            registry,
            policy,
            bearer_token: None,
        }
    }

    /// Client backed by reqwest, configured from the loaded settings.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(config.registry()),
            config.fetch.retry_policy(),
        ))
    }

    /// Copy of this client that forwards `token` as a bearer credential.
    pub fn with_bearer_token(&self, token: Option<String>) -> Self {
        Self {
            bearer_token: token,
            ..self.clone()
        }
    }

    pub fn with_policy(&self, policy: RetryPolicy) -> Self {
        Self {
            policy,
            ..self.clone()
        }
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn url(&self, endpoint: Endpoint) -> Result<String, ClientError> {
        Ok(self.registry.resolve(endpoint.service, endpoint.path)?)
    }

    pub fn url_for(&self, service: ServiceName, path: &str) -> Result<String, ClientError> {
        Ok(self.registry.resolve(service, path)?)
    }

    /// Request skeleton carrying the forwarded credentials.
    pub fn request(&self, method: Method, url: String) -> OutgoingRequest {
        let request = OutgoingRequest::new(method, url).header("Accept", "application/json");
        match &self.bearer_token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Sends `request` under `policy`. Success is any 2xx; everything else is a
    /// failed attempt that the policy may retry after a constant delay.
    pub async fn fetch_with_retry(
        &self,
        request: OutgoingRequest,
        policy: &RetryPolicy,
    ) -> Result<RawResponse, ClientError> {
        let mut request = request;
        if policy.wants_idempotency_key(&request.method)
            && request.header_value(IDEMPOTENCY_KEY_HEADER).is_none()
        {
            request = request.header(IDEMPOTENCY_KEY_HEADER, Uuid::new_v4().to_string());
        }

        let max_attempts = policy.max_attempts(&request.method);
        let mut attempt: u32 = 0;

        loop {
            debug!(
                "{} {} (attempt {}/{})",
                request.method,
                request.url,
                attempt + 1,
                max_attempts
            );

            let (failure, err) = match self.attempt(&request, policy).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => (
                    AttemptFailure::Status(response.status),
                    http_error(&request.url, &response),
                ),
                Err(failed) => failed,
            };

            if !policy.should_retry(&request.method, &failure, attempt) {
                error!(
                    "{} {} failed after {} attempt(s): {}",
                    request.method,
                    request.url,
                    attempt + 1,
                    err
                );
                return Err(err);
            }

            warn!(
                "{} {} failed ({}), retrying in {}ms",
                request.method,
                request.url,
                err,
                policy.retry_delay.as_millis()
            );
            tokio::time::sleep(policy.retry_delay).await;
            attempt += 1;
        }
    }

    async fn attempt(
        &self,
        request: &OutgoingRequest,
        policy: &RetryPolicy,
    ) -> Result<RawResponse, (AttemptFailure, ClientError)> {
        let outcome = match policy.attempt_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.transport.send(request)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    return Err((
                        AttemptFailure::Timeout,
                        ClientError::Timeout {
                            url: request.url.clone(),
                            after: limit,
                        },
                    ))
                }
            },
            None => self.transport.send(request).await,
        };

        outcome.map_err(|e| {
            (
                AttemptFailure::Network,
                ClientError::Network {
                    url: request.url.clone(),
                    message: e.to_string(),
                },
            )
        })
    }

    /// Sends under this client's own policy.
    pub async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, ClientError> {
        self.fetch_with_retry(request, &self.policy).await
    }

    pub async fn send_json<R>(&self, request: OutgoingRequest) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let url = request.url.clone();
        let response = self.send(request).await?;
        response.json::<R>(&url).map_err(|e| {
            error!("Unexpected response body from {}: {}", url, e);
            e
        })
    }

    /// For endpoints whose body the caller ignores (DELETE and friends).
    pub async fn send_unit(&self, request: OutgoingRequest) -> Result<(), ClientError> {
        self.send(request).await.map(|_| ())
    }
}

/// `detail` or `message` from a JSON error body, else the status text.
pub fn extract_error_message(body: &[u8], status_text: &str) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["detail", "message"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| status_text.to_string())
}

fn http_error(url: &str, response: &RawResponse) -> ClientError {
    let status_text = if response.status_text.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        response.status_text.clone()
    };

    ClientError::Http {
        url: url.to_string(),
        status: response.status,
        message: extract_error_message(&response.body, &status_text),
        status_text,
    }
}
