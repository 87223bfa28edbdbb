//! Write-path orchestration for page revision history.
//!
//! Three operations over the diff log:
//! - `record_edit` captures an edit as a diff record and enforces the
//!   per-page retention bound.
//! - `enforce_retention` evicts the oldest records over the bound.
//! - `revert` restores a page to a stored diff and prunes everything newer,
//!   keeping the surviving history linear.
//!
//! Each multi-step sequence runs inside a single transaction, so a
//! concurrent insert cannot race a revert into missing a row and the
//! retention bound holds even under concurrent edits of the same page.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use redline_core::history::RevertScope;
use redline_core::metadata::snapshot_page_id;
use redline_core::patch::create_patch;
use redline_core::types::DbId;

use crate::error::HistoryError;
use crate::models::page_diff::{EditSnapshot, PageDiff};
use crate::repositories::page_diff_repo::COLUMNS;

/// Orchestrates diff recording, retention, and reverts.
pub struct PageHistoryRepo;

impl PageHistoryRepo {
    /// Record one edit of a page as a diff record.
    ///
    /// Builds the unified-diff patch from the edit's content snapshots, then
    /// inserts the record and enforces retention in one transaction. The
    /// retention count is checked after the insert, so on return the page
    /// holds at most `max_diffs` records and the new record is among them.
    pub async fn record_edit(
        pool: &PgPool,
        author_id: DbId,
        page_id: DbId,
        edit: &EditSnapshot,
        max_diffs: i64,
    ) -> Result<PageDiff, HistoryError> {
        let patch = create_patch(&edit.content_before, &edit.content_after);

        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO page_diffs
                (id, page_id, author_id, patch, content_before, metadata_before, metadata_after)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let diff = sqlx::query_as::<_, PageDiff>(&query)
            .bind(Uuid::now_v7())
            .bind(page_id)
            .bind(author_id)
            .bind(&patch)
            .bind(&edit.content_before)
            .bind(&edit.metadata_before)
            .bind(&edit.metadata_after)
            .fetch_one(&mut *tx)
            .await?;

        let evicted = Self::enforce_retention(&mut *tx, page_id, max_diffs).await?;

        tx.commit().await?;

        tracing::info!(
            page_id = %page_id,
            author_id = %author_id,
            diff_id = %diff.id,
            evicted,
            "Recorded page edit"
        );
        Ok(diff)
    }

    /// Evict the oldest diffs for a page until at most `max_diffs` remain.
    ///
    /// Counts the rows visible to `conn`; inside the insert transaction that
    /// is the post-insert count, leaving exactly `max_diffs` rows behind.
    /// Returns the number of rows evicted.
    pub async fn enforce_retention(
        conn: &mut PgConnection,
        page_id: DbId,
        max_diffs: i64,
    ) -> Result<u64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM page_diffs WHERE page_id = $1")
            .bind(page_id)
            .fetch_one(&mut *conn)
            .await?;

        if count <= max_diffs {
            return Ok(0);
        }

        let result = sqlx::query(
            "DELETE FROM page_diffs WHERE id IN (
                 SELECT id FROM page_diffs
                 WHERE page_id = $1
                 ORDER BY created_at ASC, id ASC
                 LIMIT $2
             )",
        )
        .bind(page_id)
        .bind(count - max_diffs)
        .execute(&mut *conn)
        .await?;

        tracing::debug!(
            page_id = %page_id,
            evicted = result.rows_affected(),
            "Evicted diffs over retention bound"
        );
        Ok(result.rows_affected())
    }

    /// Revert a page to the state captured by a stored diff.
    ///
    /// Runs lookup, metadata validation, the scoped content/metadata writes,
    /// and the prune in that order, inside one transaction; any failure
    /// rolls the whole revert back. After the prune no diff newer than the
    /// target survives and the target becomes the page's newest diff. Calling
    /// again with the same diff re-applies the same value-identical writes
    /// and prunes nothing.
    pub async fn revert(
        pool: &PgPool,
        diff_id: DbId,
        scope: RevertScope,
    ) -> Result<PageDiff, HistoryError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM page_diffs WHERE id = $1");
        let diff = sqlx::query_as::<_, PageDiff>(&query)
            .bind(diff_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(HistoryError::DiffNotFound(diff_id))?;

        if scope.includes_data() {
            // Both snapshots must carry their page id; the before-snapshot's
            // id keys the write.
            let metadata_page_id = snapshot_page_id(&diff.metadata_before)
                .ok_or(HistoryError::InvalidMetadataStructure { diff_id })?;
            snapshot_page_id(&diff.metadata_after)
                .ok_or(HistoryError::InvalidMetadataStructure { diff_id })?;

            sqlx::query("UPDATE pages SET metadata = $1, updated_at = NOW() WHERE id = $2")
                .bind(&diff.metadata_before)
                .bind(metadata_page_id)
                .execute(&mut *tx)
                .await?;
        }

        if scope.includes_content() {
            sqlx::query("UPDATE pages SET content = $1, updated_at = NOW() WHERE id = $2")
                .bind(&diff.content_before)
                .bind(diff.page_id)
                .execute(&mut *tx)
                .await?;
        }

        // Linear history: drop every diff newer than the target. Older
        // diffs survive.
        let pruned = sqlx::query(
            "DELETE FROM page_diffs WHERE page_id = $1 AND (created_at, id) > ($2, $3)",
        )
        .bind(diff.page_id)
        .bind(diff.created_at)
        .bind(diff.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        tracing::info!(
            diff_id = %diff.id,
            page_id = %diff.page_id,
            scope = %scope,
            pruned,
            "Reverted page to stored diff"
        );
        Ok(diff)
    }
}
