//! Process-local session: the token pair held on behalf of the user.
//!
//! Tokens are only ever mutated from the command path (sign in/out) and from
//! [`Session::recover`], never from a background task.

mod retry;

pub use retry::{Recovery, TokenRefresher};

use crate::models::TokenPair;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated {
        access: String,
        refresh: Option<String>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn access_token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { access, .. } => Some(access.as_str()),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn refresh_token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { refresh, .. } => refresh.as_deref(),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn sign_in(&mut self, tokens: TokenPair) {
        info!("Session authenticated");
        self.state = SessionState::Authenticated {
            access: tokens.access,
            refresh: Some(tokens.refresh),
        };
    }

    /// Drops both tokens.
    pub fn sign_out(&mut self) {
        if self.is_authenticated() {
            info!("Session cleared");
        }
        self.state = SessionState::Unauthenticated;
    }

    /// Replaces the access token, keeping the refresh token as is.
    fn replace_access(&mut self, new_access: String) {
        if let SessionState::Authenticated { access, .. } = &mut self.state {
            *access = new_access;
        }
    }
}
