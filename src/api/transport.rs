use crate::error::{ApiError, ApiResult, Result};
use crate::NoteError;
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use std::time::Duration;
use tracing::debug;

/// A fully resolved request, ready to put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<serde_json::Value>,
    pub bearer_token: Option<String>,
}

/// Status and raw body text of a response. Non-2xx is not an error at this level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Puts a request on the wire. Only failures to obtain a response are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NoteError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(ReqwestTransport { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self.client.request(request.method, request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = &request.bearer_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {}", e)))?;

        debug!("-> {} ({} bytes)", status, body.len());
        Ok(HttpResponse { status, body })
    }
}
