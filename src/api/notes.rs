use crate::api::client::{ApiClient, ApiRequest};
use crate::error::ApiResult;
use crate::models::{BulkCreateRequest, Note, NoteDraft, NotePatch, PagedResult};
use reqwest::Method;
use std::sync::Arc;

/// Note endpoints. Every call takes the access token; judging whether it is
/// still valid is left to the session.
#[derive(Clone)]
pub struct NoteService {
    api: Arc<ApiClient>,
}

impl NoteService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        NoteService { api }
    }

    /// Lists one page (1-based) of the user's notes.
    pub fn list(
        &self,
        token: &str,
        page: u32,
        page_size: Option<u32>,
    ) -> ApiResult<PagedResult<Note>> {
        let request = ApiRequest::get("/notes/")
            .query("page", page)
            .query_opt("page_size", page_size)
            .bearer(token);
        self.api.request(request)
    }

    /// Server-side title filter with the same pagination as [`list`](Self::list).
    pub fn search(
        &self,
        token: &str,
        title: &str,
        page: u32,
        page_size: Option<u32>,
    ) -> ApiResult<PagedResult<Note>> {
        let request = ApiRequest::get("/notes/filter")
            .query("title", title)
            .query("page", page)
            .query_opt("page_size", page_size)
            .bearer(token);
        self.api.request(request)
    }

    pub fn get(&self, token: &str, id: i64) -> ApiResult<Note> {
        self.api
            .request(ApiRequest::get(note_path(id)).bearer(token))
    }

    pub fn create(&self, token: &str, title: &str, description: &str) -> ApiResult<Note> {
        let request = ApiRequest::post("/notes/")
            .json(&NoteDraft::new(title, description))?
            .bearer(token);
        self.api.request(request)
    }

    /// Full replacement of title and description.
    pub fn update(&self, token: &str, id: i64, title: &str, description: &str) -> ApiResult<Note> {
        let request = ApiRequest::new(Method::PUT, note_path(id))
            .json(&NoteDraft::new(title, description))?
            .bearer(token);
        self.api.request(request)
    }

    /// Sends only the fields present in `patch`; an empty patch is sent as `{}`.
    pub fn patch(&self, token: &str, id: i64, patch: &NotePatch) -> ApiResult<Note> {
        let request = ApiRequest::new(Method::PATCH, note_path(id))
            .json(patch)?
            .bearer(token);
        self.api.request(request)
    }

    pub fn delete(&self, token: &str, id: i64) -> ApiResult<bool> {
        self.api
            .request_no_content(ApiRequest::new(Method::DELETE, note_path(id)).bearer(token))?;
        Ok(true)
    }

    /// Creates all `items` in a single request.
    pub fn bulk_create(&self, token: &str, items: &[NoteDraft]) -> ApiResult<Vec<Note>> {
        let request = ApiRequest::post("/notes/bulk")
            .json(&BulkCreateRequest { items })?
            .bearer(token);
        self.api.request(request)
    }
}

fn note_path(id: i64) -> String {
    format!("/notes/{}/", id)
}
