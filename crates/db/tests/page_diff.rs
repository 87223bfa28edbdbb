//! Integration tests for diff record CRUD and ordering.
//!
//! Exercises `PageDiffRepo` against a real database:
//! - Insert and lookup by id
//! - Duplicate id rejection
//! - Ascending (created_at, id) ordering for page and author listings
//! - "Latest n" slicing semantics
//! - Idempotent delete
//! - Clear-by-page bulk deletion

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use redline_db::models::page_diff::NewPageDiff;
use redline_db::repositories::PageDiffRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_diff(page_id: Uuid, author_id: Uuid, marker: &str) -> NewPageDiff {
    NewPageDiff {
        id: Uuid::now_v7(),
        page_id,
        author_id,
        patch: format!("--- Content\n+++ Content\n@@ -1 +1 @@\n-old\n+{marker}\n"),
        content_before: "old".to_string(),
        metadata_before: json!({"title": "Before"}),
        metadata_after: json!({"title": marker}),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check(pool: PgPool) {
    redline_db::health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_and_find_by_id(pool: PgPool) {
    let page_id = Uuid::now_v7();
    let author_id = Uuid::now_v7();

    let input = new_diff(page_id, author_id, "v1");
    let inserted = PageDiffRepo::insert(&pool, &input).await.unwrap();
    assert_eq!(inserted.id, input.id);
    assert_eq!(inserted.page_id, page_id);
    assert_eq!(inserted.author_id, author_id);
    assert_eq!(inserted.content_before, "old");
    assert_eq!(inserted.metadata_after, json!({"title": "v1"}));

    let found = PageDiffRepo::find_by_id(&pool, input.id).await.unwrap();
    assert_eq!(found.unwrap().patch, inserted.patch);

    let missing = PageDiffRepo::find_by_id(&pool, Uuid::now_v7()).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_id_is_rejected(pool: PgPool) {
    let input = new_diff(Uuid::now_v7(), Uuid::now_v7(), "v1");
    PageDiffRepo::insert(&pool, &input).await.unwrap();

    let result = PageDiffRepo::insert(&pool, &input).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_page_is_ascending(pool: PgPool) {
    let page_id = Uuid::now_v7();
    let author_id = Uuid::now_v7();
    let other_page = Uuid::now_v7();

    for marker in ["v1", "v2", "v3"] {
        PageDiffRepo::insert(&pool, &new_diff(page_id, author_id, marker))
            .await
            .unwrap();
    }
    PageDiffRepo::insert(&pool, &new_diff(other_page, author_id, "other"))
        .await
        .unwrap();

    let diffs = PageDiffRepo::list_by_page(&pool, page_id).await.unwrap();
    assert_eq!(diffs.len(), 3);
    assert!(diffs.windows(2).all(|w| {
        (w[0].created_at, w[0].id) < (w[1].created_at, w[1].id)
    }));
    assert_eq!(diffs[0].metadata_after, json!({"title": "v1"}));
    assert_eq!(diffs[2].metadata_after, json!({"title": "v3"}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_latest_by_page_slices_the_tail(pool: PgPool) {
    let page_id = Uuid::now_v7();
    let author_id = Uuid::now_v7();

    for marker in ["v1", "v2", "v3", "v4", "v5"] {
        PageDiffRepo::insert(&pool, &new_diff(page_id, author_id, marker))
            .await
            .unwrap();
    }

    let all = PageDiffRepo::list_by_page(&pool, page_id).await.unwrap();
    let latest = PageDiffRepo::latest_by_page(&pool, page_id, 2).await.unwrap();

    let tail_ids: Vec<Uuid> = all[3..].iter().map(|d| d.id).collect();
    let latest_ids: Vec<Uuid> = latest.iter().map(|d| d.id).collect();
    assert_eq!(latest_ids, tail_ids);

    // Asking for more than exist returns everything.
    let over = PageDiffRepo::latest_by_page(&pool, page_id, 50).await.unwrap();
    assert_eq!(over.len(), 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_and_latest_by_author(pool: PgPool) {
    let author_id = Uuid::now_v7();
    let other_author = Uuid::now_v7();

    for marker in ["a1", "a2", "a3"] {
        PageDiffRepo::insert(&pool, &new_diff(Uuid::now_v7(), author_id, marker))
            .await
            .unwrap();
    }
    PageDiffRepo::insert(&pool, &new_diff(Uuid::now_v7(), other_author, "b1"))
        .await
        .unwrap();

    let all = PageDiffRepo::list_by_author(&pool, author_id).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].metadata_after, json!({"title": "a1"}));

    let latest = PageDiffRepo::latest_by_author(&pool, author_id, 2).await.unwrap();
    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].metadata_after, json!({"title": "a2"}));
    assert_eq!(latest[1].metadata_after, json!({"title": "a3"}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_by_id_is_idempotent(pool: PgPool) {
    let input = new_diff(Uuid::now_v7(), Uuid::now_v7(), "v1");
    PageDiffRepo::insert(&pool, &input).await.unwrap();

    let removed = PageDiffRepo::delete_by_id(&pool, input.id).await.unwrap();
    assert!(removed);

    // Deleting an already-absent id succeeds.
    let removed_again = PageDiffRepo::delete_by_id(&pool, input.id).await.unwrap();
    assert!(!removed_again);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clear_by_page(pool: PgPool) {
    let page_id = Uuid::now_v7();
    let other_page = Uuid::now_v7();
    let author_id = Uuid::now_v7();

    for marker in ["v1", "v2"] {
        PageDiffRepo::insert(&pool, &new_diff(page_id, author_id, marker))
            .await
            .unwrap();
    }
    PageDiffRepo::insert(&pool, &new_diff(other_page, author_id, "keep"))
        .await
        .unwrap();

    let cleared = PageDiffRepo::clear_by_page(&pool, page_id).await.unwrap();
    assert_eq!(cleared, 2);
    assert_eq!(PageDiffRepo::count_by_page(&pool, page_id).await.unwrap(), 0);
    assert_eq!(PageDiffRepo::count_by_page(&pool, other_page).await.unwrap(), 1);
}
