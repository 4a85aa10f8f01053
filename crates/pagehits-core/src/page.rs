//! Page model.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Registry-assigned page identifier. Starts at 1, never reused.
pub type PageId = u64;

/// A tracked page. Values handed out by the registry are snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub id: PageId,
    /// Display label, not unique.
    pub name: String,
    pub hits: u64,
    /// Serialized as RFC 3339.
    pub created_at: DateTime<Utc>,
}
