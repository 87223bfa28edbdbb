//! Error type for the revision-history write path.

use redline_core::types::DbId;

/// Errors from recording, pruning, or reverting page diffs.
///
/// A closed enum so API callers can handle each kind exhaustively:
/// `DiffNotFound` and `InvalidMetadataStructure` map to 4xx responses,
/// `Storage` to 5xx.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The referenced diff record does not exist.
    #[error("Diff not found: {0}")]
    DiffNotFound(DbId),

    /// A stored metadata snapshot lacks its page id. This is historical
    /// data corruption; the revert fails rather than guessing an id.
    #[error("Metadata snapshot for diff {diff_id} is missing its page id")]
    InvalidMetadataStructure { diff_id: DbId },

    /// Backend read/write failure, including retention deletes that could
    /// not be applied. Not retried at this layer.
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}
