use crate::api::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::{ApiError, ApiResult, Result};
use crate::NoteError;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Method, path, query, body and credentials of one backend call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    bearer_token: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer_token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Attaches a JSON body. The transport sets the JSON content type.
    pub fn json<B: Serialize>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Decoding(format!("Failed to encode request body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer_token = Some(token.to_string());
        self
    }
}

/// Blocking client over an async [`Transport`].
///
/// Each call suspends the caller until the response (or failure) is in,
/// then classifies it into a typed value or an [`ApiError`].
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    runtime: Runtime,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| NoteError::Internal(format!("Failed to create runtime: {}", e)))?;

        Ok(ApiClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            runtime,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> ApiResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ApiError::Network(format!("Invalid URL for path {}: {}", path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    fn execute(&self, request: ApiRequest) -> ApiResult<HttpResponse> {
        let url = self.build_url(&request.path, &request.query)?;
        let http_request = HttpRequest {
            method: request.method,
            url,
            body: request.body,
            bearer_token: request.bearer_token,
        };
        self.runtime.block_on(self.transport.send(http_request))
    }

    /// Performs the call and decodes a JSON body into `T`.
    pub fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        decode_response(self.execute(request)?)
    }

    /// Like [`request`](Self::request), but an empty 2xx body yields `T::default()`.
    pub fn request_or_default<T: DeserializeOwned + Default>(
        &self,
        request: ApiRequest,
    ) -> ApiResult<T> {
        let response = self.execute(request)?;
        if response.is_success() && response.body.trim().is_empty() {
            return Ok(T::default());
        }
        decode_response(response)
    }

    /// Performs a call whose body is irrelevant (delete-style).
    pub fn request_no_content(&self, request: ApiRequest) -> ApiResult<()> {
        let response = self.execute(request)?;
        if response.is_success() {
            Ok(())
        } else {
            Err(ApiError::Server {
                status: response.status,
                body: response.body,
            })
        }
    }
}

/// Classifies a response: 2xx decodes into `T`, anything else is a server error.
pub fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> ApiResult<T> {
    if !response.is_success() {
        return Err(ApiError::Server {
            status: response.status,
            body: response.body,
        });
    }

    let type_name = std::any::type_name::<T>();
    if response.body.trim().is_empty() {
        return Err(ApiError::Decoding(format!(
            "Empty response body for type {}",
            type_name
        )));
    }

    serde_json::from_str(&response.body).map_err(|e| {
        ApiError::Decoding(format!(
            "Failed to decode {}: {} (body: {})",
            type_name, e, response.body
        ))
    })
}
