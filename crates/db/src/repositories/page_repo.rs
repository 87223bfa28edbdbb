//! Repository for the `pages` table.
//!
//! This is the record store the revert engine writes back into: the current
//! content body and metadata document of each page.

use sqlx::PgPool;

use redline_core::types::DbId;

use crate::models::page::{CreatePage, Page};

/// Column list for pages queries.
const COLUMNS: &str = "id, title, slug, content, metadata, created_at, updated_at";

/// Provides CRUD and content/metadata access for pages.
pub struct PageRepo;

impl PageRepo {
    /// Create a new page.
    pub async fn create(pool: &PgPool, input: &CreatePage) -> Result<Page, sqlx::Error> {
        let query = format!(
            "INSERT INTO pages (title, slug, content, metadata)
             VALUES ($1, $2, $3, COALESCE($4, '{{}}'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// Find a page by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read a page's current content body.
    pub async fn read_content(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as("SELECT content FROM pages WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(content,)| content))
    }

    /// Overwrite a page's content body. Returns `true` if a row was updated.
    pub async fn write_content(pool: &PgPool, id: DbId, content: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE pages SET content = $1, updated_at = NOW() WHERE id = $2")
            .bind(content)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read a page's current metadata document.
    pub async fn read_metadata(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT metadata FROM pages WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(metadata,)| metadata))
    }

    /// Overwrite a page's metadata document. Returns `true` if a row was
    /// updated.
    pub async fn write_metadata(
        pool: &PgPool,
        id: DbId,
        metadata: &serde_json::Value,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE pages SET metadata = $1, updated_at = NOW() WHERE id = $2")
            .bind(metadata)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a page by ID. Returns `true` if a row was removed.
    ///
    /// Does not touch the diff log; callers that want the history gone too
    /// pair this with `PageDiffRepo::clear_by_page`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
