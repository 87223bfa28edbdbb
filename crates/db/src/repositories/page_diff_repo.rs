//! Repository for the `page_diffs` table.
//!
//! Diff records are immutable once written; this repo only inserts, reads,
//! and deletes whole rows. All listings are ordered ascending by
//! `(created_at, id)`; the id column is a time-ordered UUID, so it doubles
//! as the insertion-order tie-break when timestamps collide.

use sqlx::PgPool;

use redline_core::types::DbId;

use crate::models::page_diff::{NewPageDiff, PageDiff};

/// Column list for page_diffs queries.
pub(crate) const COLUMNS: &str =
    "id, page_id, author_id, patch, content_before, metadata_before, metadata_after, created_at";

/// Provides CRUD operations for page diff records.
pub struct PageDiffRepo;

impl PageDiffRepo {
    /// Insert a fully-formed diff record.
    ///
    /// Fails on a duplicate id (unique primary key) or backend failure.
    pub async fn insert(pool: &PgPool, input: &NewPageDiff) -> Result<PageDiff, sqlx::Error> {
        let query = format!(
            "INSERT INTO page_diffs
                (id, page_id, author_id, patch, content_before, metadata_before, metadata_after)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PageDiff>(&query)
            .bind(input.id)
            .bind(input.page_id)
            .bind(input.author_id)
            .bind(&input.patch)
            .bind(&input.content_before)
            .bind(&input.metadata_before)
            .bind(&input.metadata_after)
            .fetch_one(pool)
            .await
    }

    /// Find a diff record by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PageDiff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM page_diffs WHERE id = $1");
        sqlx::query_as::<_, PageDiff>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all diffs for a page, oldest first.
    pub async fn list_by_page(pool: &PgPool, page_id: DbId) -> Result<Vec<PageDiff>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_diffs
             WHERE page_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, PageDiff>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// List the newest `n` diffs for a page, still oldest first.
    ///
    /// Equivalent to slicing the tail of [`Self::list_by_page`].
    pub async fn latest_by_page(
        pool: &PgPool,
        page_id: DbId,
        n: i64,
    ) -> Result<Vec<PageDiff>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM (
                 SELECT {COLUMNS} FROM page_diffs
                 WHERE page_id = $1
                 ORDER BY created_at DESC, id DESC
                 LIMIT $2
             ) newest
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, PageDiff>(&query)
            .bind(page_id)
            .bind(n)
            .fetch_all(pool)
            .await
    }

    /// List all diffs authored by a user, oldest first.
    pub async fn list_by_author(
        pool: &PgPool,
        author_id: DbId,
    ) -> Result<Vec<PageDiff>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_diffs
             WHERE author_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, PageDiff>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// List the newest `n` diffs authored by a user, still oldest first.
    pub async fn latest_by_author(
        pool: &PgPool,
        author_id: DbId,
        n: i64,
    ) -> Result<Vec<PageDiff>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM (
                 SELECT {COLUMNS} FROM page_diffs
                 WHERE author_id = $1
                 ORDER BY created_at DESC, id DESC
                 LIMIT $2
             ) newest
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, PageDiff>(&query)
            .bind(author_id)
            .bind(n)
            .fetch_all(pool)
            .await
    }

    /// Delete a diff record by ID. Returns `true` if a row was removed.
    ///
    /// Deleting an already-absent id is success, not an error; pruning
    /// callers rely on that.
    pub async fn delete_by_id(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM page_diffs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all diffs for a page. Returns the number of rows removed.
    pub async fn clear_by_page(pool: &PgPool, page_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM page_diffs WHERE page_id = $1")
            .bind(page_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count stored diffs for a page.
    pub async fn count_by_page(pool: &PgPool, page_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM page_diffs WHERE page_id = $1")
            .bind(page_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
