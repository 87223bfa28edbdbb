//! Page models and DTOs.
//!
//! Pages are the versioned content records whose edit history Redline
//! tracks: a content body plus a structured metadata document.

use redline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    /// Structured metadata document. Snapshots of this value are what the
    /// diff log stores and the metadata differ compares.
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new page.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub title: String,
    pub slug: String,
    pub content: String,
    /// Defaults to an empty object if `None`.
    pub metadata: Option<serde_json::Value>,
}
