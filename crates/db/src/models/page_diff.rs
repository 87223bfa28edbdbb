//! Page diff models and DTOs.
//!
//! A diff record is an immutable unit of history: the unified-diff patch of
//! one edit plus enough snapshot data to revert it. Records are only ever
//! deleted whole, by retention eviction, revert pruning, or an explicit
//! clear.

use redline_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `page_diffs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageDiff {
    pub id: DbId,
    pub page_id: DbId,
    pub author_id: DbId,
    /// Unified-diff text between the content before and after the edit,
    /// both sides labeled `Content`.
    pub patch: String,
    /// Full content body as it was before the edit. Reverts restore this
    /// directly instead of re-deriving it from the patch.
    pub content_before: String,
    /// Metadata snapshot before the edit.
    pub metadata_before: serde_json::Value,
    /// Metadata snapshot after the edit.
    pub metadata_after: serde_json::Value,
    /// Sole ordering key within a page's diff sequence; ties are broken by
    /// `id` (time-ordered UUIDs, so id order is insertion order).
    pub created_at: Timestamp,
}

/// A fully-formed diff record ready for insertion.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPageDiff {
    pub id: DbId,
    pub page_id: DbId,
    pub author_id: DbId,
    pub patch: String,
    pub content_before: String,
    pub metadata_before: serde_json::Value,
    pub metadata_after: serde_json::Value,
}

/// Before/after snapshots of a single edit, as captured by the editor.
#[derive(Debug, Clone, Deserialize)]
pub struct EditSnapshot {
    pub content_before: String,
    pub content_after: String,
    pub metadata_before: serde_json::Value,
    pub metadata_after: serde_json::Value,
}
