use super::{Session, SessionState};
use crate::api::AuthService;
use crate::error::{ApiError, ApiResult, NoteError, Result};
use tracing::{info, warn};

/// Obtains a new access token from a refresh token.
pub trait TokenRefresher {
    fn refresh(&self, refresh_token: &str) -> ApiResult<String>;
}

impl TokenRefresher for AuthService {
    fn refresh(&self, refresh_token: &str) -> ApiResult<String> {
        AuthService::refresh(self, refresh_token)
    }
}

/// What [`Session::recover`] did about a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery {
    /// Not an expiry; the session is untouched.
    Unchanged,
    /// A new access token is in place; the caller should re-issue its command.
    Refreshed,
    /// Both tokens are gone. Holds the refresh failure, or `None` when there
    /// was no refresh token to try.
    SignedOut(Option<ApiError>),
}

impl Session {
    /// Reacts to a failed authenticated call.
    ///
    /// Only `Server(401, _)` is acted on: with a refresh token held, exactly
    /// one refresh is attempted and the access token replaced on success;
    /// any refresh failure, or no refresh token at all, signs the session out.
    pub fn recover<R: TokenRefresher + ?Sized>(
        &mut self,
        refresher: &R,
        error: &ApiError,
    ) -> Recovery {
        if !error.is_unauthorized() {
            return Recovery::Unchanged;
        }

        let refresh_token = match self.refresh_token() {
            Some(token) => token.to_string(),
            None => {
                info!("Access token rejected and no refresh token held");
                self.state = SessionState::Unauthenticated;
                return Recovery::SignedOut(None);
            }
        };

        match refresher.refresh(&refresh_token) {
            Ok(access) => {
                info!("Access token refreshed");
                self.replace_access(access);
                Recovery::Refreshed
            }
            Err(refresh_error) => {
                warn!("Token refresh failed: {}", refresh_error);
                self.state = SessionState::Unauthenticated;
                Recovery::SignedOut(Some(refresh_error))
            }
        }
    }

    /// Runs one authenticated call with the current access token.
    ///
    /// The call is never replayed: after a successful refresh the 401 that
    /// triggered it comes back as [`NoteError::TokenRefreshed`].
    pub fn authorized<T, R, F>(&mut self, refresher: &R, call: F) -> Result<T>
    where
        R: TokenRefresher + ?Sized,
        F: FnOnce(&str) -> ApiResult<T>,
    {
        let token = self
            .access_token()
            .ok_or(NoteError::NotAuthenticated)?
            .to_string();

        let error = match call(&token) {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        match self.recover(refresher, &error) {
            Recovery::Unchanged => Err(NoteError::Api(error)),
            Recovery::Refreshed => Err(NoteError::TokenRefreshed(error)),
            Recovery::SignedOut(Some(refresh)) => Err(NoteError::SessionExpired {
                cause: error,
                refresh,
            }),
            Recovery::SignedOut(None) => Err(NoteError::LoginRequired(error)),
        }
    }
}
