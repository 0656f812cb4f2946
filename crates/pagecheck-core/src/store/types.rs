//! Records returned by the page store.

/// URL identifier.
pub type UrlId = i64;

/// Check identifier.
pub type CheckId = i64;

/// A stored, normalized URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: UrlId,
    pub name: String,
    pub created_at: i64,
}

/// One stored check of a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRecord {
    pub id: CheckId,
    pub url_id: UrlId,
    pub status_code: Option<u16>,
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: i64,
}

/// Listing row: a URL with the time and status of its latest check, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSummary {
    pub id: UrlId,
    pub name: String,
    pub created_at: i64,
    pub last_check_at: Option<i64>,
    pub last_status_code: Option<u16>,
}
