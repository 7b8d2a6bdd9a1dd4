//! HTTP plumbing shared by the project and journal adapters.
//!
//! The adapters never talk to the network directly. They build an
//! [`ApiRequest`] and hand it to an [`HttpClient`], which runs it through a
//! [`Transport`] on tokio's blocking pool:
//! - [`UreqTransport`] talks to a live backend
//! - tests swap in an in-memory transport that records every request

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::types::ErrorBody;
use crate::config::ClientConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::metadata::USER_AGENT;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request relative to the backend's base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }

    pub fn post<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> ServiceResult<Self> {
        Ok(Self {
            method: Method::Post,
            path: path.into(),
            body: Some(serde_json::to_value(body)?),
        })
    }

    pub fn put<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> ServiceResult<Self> {
        Ok(Self {
            method: Method::Put,
            path: path.into(),
            body: Some(serde_json::to_value(body)?),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Turns an [`ApiRequest`] into an [`ApiResponse`].
///
/// Implementations return `Err` only when no response was received at all.
/// Any HTTP status, including 4xx and 5xx, comes back as an `ApiResponse`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &ApiRequest) -> ServiceResult<ApiResponse>;
}

/// Accepts `localhost:8081` as well as full URLs, and drops trailing slashes.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Blocking transport backed by a `ureq` agent.
pub struct UreqTransport {
    base_url: String,
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self {
            base_url: normalize_base_url(base_url),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &ApiRequest) -> ServiceResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        let call = self
            .agent
            .request(request.method.as_str(), &url)
            .set("Accept", "application/json");

        let result = match &request.body {
            Some(body) => call.send_json(body),
            None => call.call(),
        };

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(e)) => {
                return Err(ServiceError::Network(format!(
                    "{} {} failed: {}",
                    request.method, url, e
                )));
            }
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| ServiceError::Network(format!("Failed to read response: {}", e)))?;

        Ok(ApiResponse { status, body })
    }
}

/// The shared, preconfigured request issuer handed to every adapter.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn from_config(config: &ClientConfig) -> ServiceResult<Self> {
        config.validate()?;
        let transport = UreqTransport::new(&config.base_url, config.timeout());
        tracing::debug!(
            base_url = transport.base_url(),
            timeout_secs = config.timeout_secs,
            "connecting to backend"
        );
        Ok(Self::new(Arc::new(transport)))
    }

    /// Send a request and fail on any non-2xx status.
    pub async fn send(&self, request: ApiRequest) -> ServiceResult<ApiResponse> {
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!(%method, %path, has_body = request.body.is_some(), "sending request");

        let transport = Arc::clone(&self.transport);
        let response = tokio::task::spawn_blocking(move || transport.execute(&request))
            .await
            .map_err(|e| ServiceError::Other(format!("spawn_blocking failed: {}", e)))??;

        tracing::debug!(%method, %path, status = response.status, "received response");

        if response.is_success() {
            Ok(response)
        } else {
            let err = api_error(&response);
            tracing::warn!(%method, %path, status = response.status, error = %err, "request failed");
            Err(err)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ServiceResult<T> {
        let response = self.send(ApiRequest::get(path)).await?;
        decode(&response)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ServiceResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(ApiRequest::post(path, body)?).await?;
        decode(&response)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ServiceResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(ApiRequest::put(path, body)?).await?;
        decode(&response)
    }

    /// Issue a DELETE; the response body, if any, is ignored.
    pub async fn delete(&self, path: &str) -> ServiceResult<()> {
        self.send(ApiRequest::delete(path)).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> ServiceResult<T> {
    serde_json::from_str(&response.body).map_err(ServiceError::Decode)
}

fn api_error(response: &ApiResponse) -> ServiceError {
    let body = response.body.trim();
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => error.error_message,
        Err(_) if body.is_empty() => "no response body".to_string(),
        Err(_) => body.to_string(),
    };
    ServiceError::Api {
        status: response.status,
        message,
    }
}
