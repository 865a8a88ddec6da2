use crate::models::{LocalNote, NewLocalNote, Note};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cached note not found")]
    NotFound,
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

const COLUMNS: &str =
    "local_id, server_id, title, description, created_at, updated_at, is_synced";

fn map_row(row: &Row<'_>) -> Result<LocalNote> {
    Ok(LocalNote {
        local_id: row.get(0)?,
        server_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
        is_synced: row.get(6)?,
    })
}

/// Inserts a new note and returns it with its local id
pub fn insert(conn: &Connection, new_note: NewLocalNote) -> Result<LocalNote, CacheError> {
    conn.execute(
        "INSERT INTO notes (server_id, title, description, created_at, updated_at, is_synced)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new_note.server_id,
            &new_note.title,
            &new_note.description,
            &new_note.created_at,
            &new_note.updated_at,
            new_note.is_synced,
        ],
    )?;

    Ok(LocalNote {
        local_id: conn.last_insert_rowid(),
        server_id: new_note.server_id,
        title: new_note.title,
        description: new_note.description,
        created_at: new_note.created_at,
        updated_at: new_note.updated_at,
        is_synced: new_note.is_synced,
    })
}

/// Lists all cached notes, newest local row first.
pub fn list(conn: &Connection) -> Result<Vec<LocalNote>, CacheError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM notes ORDER BY local_id DESC",
        COLUMNS
    ))?;

    let notes = stmt
        .query_map([], map_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(notes)
}

pub fn get(conn: &Connection, local_id: i64) -> Result<Option<LocalNote>, CacheError> {
    let note = conn
        .query_row(
            &format!("SELECT {} FROM notes WHERE local_id = ?1", COLUMNS),
            params![local_id],
            map_row,
        )
        .optional()?;
    Ok(note)
}

pub fn get_by_server_id(conn: &Connection, server_id: i64) -> Result<Option<LocalNote>, CacheError> {
    let note = conn
        .query_row(
            &format!("SELECT {} FROM notes WHERE server_id = ?1", COLUMNS),
            params![server_id],
            map_row,
        )
        .optional()?;
    Ok(note)
}

/// Edits a note locally and marks it unsynced until the server has seen it.
///
/// Returns false if no row has `local_id`.
pub fn update(
    conn: &Connection,
    local_id: i64,
    title: &str,
    description: &str,
) -> Result<bool, CacheError> {
    let now = Utc::now().to_rfc3339();
    let rows_affected = conn.execute(
        "UPDATE notes SET title = ?1, description = ?2, updated_at = ?3, is_synced = 0
         WHERE local_id = ?4",
        params![title, description, now, local_id],
    )?;
    Ok(rows_affected > 0)
}

/// Deletes a note by local id
///
/// Returns NotFound error if the note doesn't exist (no rows affected).
pub fn delete(conn: &Connection, local_id: i64) -> Result<(), CacheError> {
    let rows_affected = conn.execute("DELETE FROM notes WHERE local_id = ?1", params![local_id])?;

    if rows_affected == 0 {
        return Err(CacheError::NotFound);
    }

    Ok(())
}

pub fn clear(conn: &Connection) -> Result<usize, CacheError> {
    Ok(conn.execute("DELETE FROM notes", [])?)
}

/// Notes carrying changes the server has not seen, oldest first.
pub fn list_unsynced(conn: &Connection) -> Result<Vec<LocalNote>, CacheError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM notes WHERE is_synced = 0 ORDER BY local_id ASC",
        COLUMNS
    ))?;

    let notes = stmt
        .query_map([], map_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(notes)
}

/// Records that the server holds this note under `server_id`.
pub fn mark_synced(
    conn: &Connection,
    local_id: i64,
    server_id: i64,
    created_at: Option<&str>,
    updated_at: Option<&str>,
) -> Result<bool, CacheError> {
    let rows_affected = conn.execute(
        "UPDATE notes SET server_id = ?1, created_at = ?2, updated_at = ?3, is_synced = 1
         WHERE local_id = ?4",
        params![server_id, created_at, updated_at, local_id],
    )?;
    Ok(rows_affected > 0)
}

/// Mirrors a server note into the cache as synced.
///
/// A row holding unsynced local edits for the same server id is left as is.
/// Returns whether a row was written.
pub fn upsert_remote(conn: &Connection, note: &Note) -> Result<bool, CacheError> {
    let rows_affected = conn.execute(
        "INSERT INTO notes (server_id, title, description, created_at, updated_at, is_synced)
         VALUES (?1, ?2, ?3, ?4, ?5, 1)
         ON CONFLICT(server_id) DO UPDATE SET
            title = excluded.title,
            description = excluded.description,
            created_at = excluded.created_at,
            updated_at = excluded.updated_at,
            is_synced = 1
         WHERE notes.is_synced = 1",
        params![
            note.id,
            &note.title,
            &note.description,
            &note.created_at,
            &note.updated_at,
        ],
    )?;
    Ok(rows_affected > 0)
}

/// Drops the cached copy of a note deleted on the server.
pub fn remove_remote(conn: &Connection, server_id: i64) -> Result<bool, CacheError> {
    let rows_affected = conn.execute("DELETE FROM notes WHERE server_id = ?1", params![server_id])?;
    Ok(rows_affected > 0)
}
