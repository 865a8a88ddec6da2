//! In-memory transport for unit tests.

use crate::api::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ApiResult<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn push_error(&self, error: ApiError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no canned response".to_string())))
    }
}

/// A note body as the server would send it.
pub fn note_json(id: i64, title: &str, description: &str) -> String {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": description,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z",
        "creator_name": "Alice Liddell",
        "creator_username": "alice",
    })
    .to_string()
}
