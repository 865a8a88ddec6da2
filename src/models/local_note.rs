use serde::{Deserialize, Serialize};

/// A row of the local note cache.
///
/// `server_id` is `None` for notes that exist only locally. `is_synced` is
/// false while the row carries edits the server has not seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalNote {
    pub local_id: i64,
    pub server_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub is_synced: bool,
}

/// Represents a new local note to be inserted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLocalNote {
    pub server_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub is_synced: bool,
}

impl NewLocalNote {
    /// A note written offline, not yet known to the server
    pub fn draft(title: impl Into<String>, description: impl Into<String>) -> Self {
        NewLocalNote {
            server_id: None,
            title: title.into(),
            description: description.into(),
            created_at: None,
            updated_at: None,
            is_synced: false,
        }
    }
}
