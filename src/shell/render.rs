use crate::models::{LocalNote, Note, PagedResult, UserInfo};

pub const HELP: &str = "\
Available commands:
register                    - Register a new account
login                       - Login with username and password
list [page]                 - Show notes list (paginated)
search <query> [page]       - Search notes by title
get <id>                    - Show note by ID
create <title> <desc>       - Add a new note
update <id> <title> <desc>  - Update note
patch <id> [title] [desc]   - Patch note (partial update)
delete <id>                 - Delete note
cached                      - Show notes in the local cache
settings                    - View profile / change password / logout
help                        - Show this help
exit                        - Exit program
Quote arguments that contain spaces: create \"Team sync\" \"agenda and notes\"";

pub const SETTINGS_HELP: &str = "\
Settings:
profile          - Show profile info
change-password  - Change your password
logout           - Logout
back             - Return";

pub fn note_line(note: &Note) -> String {
    format!("[{}] {}", note.id, note.title)
}

pub fn note_detail(note: &Note) -> String {
    let mut out = format!("Note: [{}] {} / {}", note.id, note.title, note.description);
    if let Some(creator) = note.creator_username.as_ref().or(note.creator_name.as_ref()) {
        out.push_str(&format!("\n by: {}", creator));
    }
    if let Some(updated) = note.updated_at.as_ref().or(note.created_at.as_ref()) {
        out.push_str(&format!("\n updated: {}", updated));
    }
    out
}

pub fn page(page: &PagedResult<Note>, number: u32, empty_text: &str) -> String {
    if page.results.is_empty() {
        return empty_text.to_string();
    }
    let mut lines: Vec<String> = page.results.iter().map(note_line).collect();
    lines.push(format!("Page {} / total {}", number, page.count));
    lines.join("\n")
}

fn or_na(value: Option<&String>) -> &str {
    value.map(String::as_str).unwrap_or("n/a")
}

pub fn profile(info: &UserInfo) -> String {
    let id = info
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "Profile:\n id: {}\n username: {}\n email: {}\n first name: {}\n last name: {}",
        id,
        info.username,
        or_na(info.email.as_ref()),
        or_na(info.first_name.as_ref()),
        or_na(info.last_name.as_ref()),
    )
}

/// `*` marks rows with edits the server has not seen.
pub fn local_note_line(note: &LocalNote) -> String {
    let server = note
        .server_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let marker = if note.is_synced { " " } else { "*" };
    format!("{}[{}] (local {}) {}", marker, server, note.local_id, note.title)
}
