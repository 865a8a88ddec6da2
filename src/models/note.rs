use serde::{Deserialize, Serialize};

/// A note as returned by the server. `id` and the timestamps are server-assigned.
///
/// Timestamps are kept as the server's text; naive and offset forms both
/// occur in the wild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub creator_name: Option<String>,
    pub creator_username: Option<String>,
}

/// Body of create, full update and each bulk-create item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        NoteDraft {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Partial update; absent fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkCreateRequest<'a> {
    pub items: &'a [NoteDraft],
}

/// One page of a page-number paginated listing.
///
/// `count` is the total across all pages; `next` and `previous` are the
/// server's links to the neighbouring pages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PagedResult<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PagedResult<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Number of pages needed to hold `count` items at `page_size` per page.
    pub fn total_pages(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.count.div_ceil(u64::from(page_size))
    }
}
