use crate::api::{ApiClient, AuthService, NoteService, ReqwestTransport};
use crate::config::Config;
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;

pub fn create_client(config: &Config) -> Result<Arc<ApiClient>> {
    let transport = ReqwestTransport::new(Duration::from_secs(config.request_timeout_secs))?;
    let client = ApiClient::new(config.base_url.clone(), Arc::new(transport))?;
    Ok(Arc::new(client))
}

/// Both services over one shared client
pub fn create_services(config: &Config) -> Result<(AuthService, NoteService)> {
    let client = create_client(config)?;
    Ok((AuthService::new(client.clone()), NoteService::new(client)))
}
