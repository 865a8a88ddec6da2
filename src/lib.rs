pub mod api;
pub mod config;
pub mod database;
mod error;
pub mod logger;
pub mod models;
pub mod session;
pub mod shell;

pub use error::{ApiError, ApiResult, NoteError, Result};

use config::Config;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Builds the shared client from `config` and runs the interactive shell
/// over `input`/`output` until it exits.
pub fn run<R: BufRead, W: Write>(config: &Config, input: R, output: W) -> Result<()> {
    let (auth, notes) = api::create_services(config)?;
    info!("Using backend {}", config.base_url);

    let mut shell = shell::Shell::new(input, output, auth, notes).with_page_size(config.page_size);

    if config.cache_enabled {
        let path = config.resolve_database_path()?;
        match database::init_db(&path) {
            Ok(conn) => shell = shell.with_cache(conn),
            Err(e) => warn!("Local cache unavailable ({:?}): {}", path, e),
        }
    }

    shell.run()
}
