use rusqlite::{Connection, Result};
use tracing::info;

/// Creates the local note cache table and its index
///
/// `server_id` is NULL for notes written offline and unique otherwise, so a
/// server note maps onto at most one local row.
pub fn create_tables(conn: &Connection) -> Result<()> {
    info!("Creating database schema");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS notes (
            local_id INTEGER PRIMARY KEY AUTOINCREMENT,
            server_id INTEGER UNIQUE,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            created_at TEXT,
            updated_at TEXT,
            is_synced INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_notes_is_synced ON notes(is_synced)",
        [],
    )?;

    info!("Database schema created successfully");
    Ok(())
}
