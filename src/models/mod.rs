mod auth;
mod local_note;
mod note;

pub use auth::{MessageResponse, ProfileSummary, RegisterRequest, TokenPair, UserInfo};
pub(crate) use auth::{AccessToken, ChangePasswordRequest, LoginRequest, RefreshRequest};
pub use local_note::{LocalNote, NewLocalNote};
pub(crate) use note::BulkCreateRequest;
pub use note::{Note, NoteDraft, NotePatch, PagedResult};
