pub mod auth;
pub mod client;
pub mod factory;
pub mod notes;
#[cfg(test)]
pub mod testing;
pub mod transport;

pub use auth::AuthService;
pub use client::{ApiClient, ApiRequest};
pub use factory::{create_client, create_services};
pub use notes::NoteService;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
