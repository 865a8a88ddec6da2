pub mod notes;
mod schema;

use rusqlite::{Connection, Result};
use std::path::Path;
use tracing::{error, info};

pub use schema::create_tables;

pub use notes::CacheError;
pub use notes::{
    clear as clear_notes, delete as delete_note, get as get_note, get_by_server_id,
    insert as insert_note, list as list_notes, list_unsynced, mark_synced, remove_remote,
    update as update_note, upsert_remote,
};

// Convert CacheError to NoteError
impl From<CacheError> for crate::NoteError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::DatabaseError(e) => crate::NoteError::Database(e),
            CacheError::NotFound => {
                crate::NoteError::InvalidArgument("Cached note not found".to_string())
            }
        }
    }
}

/// Opens a connection to the SQLite database at `path`
///
/// Enables WAL mode for better concurrency and performance
pub fn get_connection(path: &Path) -> Result<Connection> {
    info!("Opening database connection: {:?}", path);

    let conn = Connection::open(path)?;

    // journal_mode returns a value, so it goes through query_row
    let _journal_mode = conn.query_row("PRAGMA journal_mode = WAL", [], |row| {
        row.get::<_, String>(0)
    })?;

    conn.busy_timeout(std::time::Duration::from_secs(5))?;

    info!("Database connection opened successfully");
    Ok(conn)
}

/// Opens the database at `path` and creates the schema if it doesn't exist
pub fn init_db(path: &Path) -> Result<Connection> {
    info!("Initializing database");

    let conn = get_connection(path)?;

    create_tables(&conn).map_err(|e| {
        error!("Failed to create database tables: {}", e);
        e
    })?;

    info!("Database initialized successfully");
    Ok(conn)
}
