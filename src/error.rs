use serde::Deserialize;
use thiserror::Error;

/// Failure of a single call against the notes backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response was obtained (connect, DNS, timeout, unreadable body).
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived but did not match the expected shape.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// The server answered with a non-2xx status.
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The `detail` message of a JSON error body, if the server sent one.
    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::Server { body, .. } => serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.detail),
            _ => None,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Please login first")]
    NotAuthenticated,

    #[error("{0}\nAccess token refreshed. Try your command again.")]
    TokenRefreshed(ApiError),

    #[error("{cause}\nRefresh failed: {refresh}. Please login again.")]
    SessionExpired { cause: ApiError, refresh: ApiError },

    #[error("{0}\nNo refresh token available; please login again.")]
    LoginRequired(ApiError),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, NoteError>;
