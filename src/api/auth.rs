use crate::api::client::{ApiClient, ApiRequest};
use crate::error::ApiResult;
use crate::models::{
    AccessToken, ChangePasswordRequest, LoginRequest, MessageResponse, ProfileSummary,
    RefreshRequest, RegisterRequest, TokenPair, UserInfo,
};
use std::sync::Arc;

/// Account endpoints under `/auth/`.
///
/// Password/retype equality for register and change-password is checked by
/// the caller before any of these are invoked.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        AuthService { api }
    }

    pub fn login(&self, username: &str, password: &str) -> ApiResult<TokenPair> {
        let request = ApiRequest::post("/auth/token/").json(&LoginRequest { username, password })?;
        self.api.request(request)
    }

    pub fn register(
        &self,
        first_name: &str,
        last_name: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<ProfileSummary> {
        let body = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };
        self.api.request(ApiRequest::post("/auth/register/").json(&body)?)
    }

    /// Exchanges a refresh token for a new access token. The refresh token is not rotated.
    pub fn refresh(&self, refresh_token: &str) -> ApiResult<String> {
        let request = ApiRequest::post("/auth/token/refresh/").json(&RefreshRequest {
            refresh: refresh_token,
        })?;
        let token: AccessToken = self.api.request(request)?;
        Ok(token.access)
    }

    pub fn get_profile(&self, access_token: &str) -> ApiResult<UserInfo> {
        self.api
            .request(ApiRequest::get("/auth/userinfo/").bearer(access_token))
    }

    pub fn change_password(
        &self,
        access_token: &str,
        old_password: &str,
        new_password: &str,
    ) -> ApiResult<MessageResponse> {
        let request = ApiRequest::post("/auth/change-password/")
            .json(&ChangePasswordRequest {
                old_password,
                new_password,
            })?
            .bearer(access_token);
        self.api.request_or_default(request)
    }
}
