/// Load Module
///
/// Handles storing transformed posts into the SQLite database.
use anyhow::{Context, Result};

use crate::db::UnitOfWork;
use crate::models::PostRecord;

/// Upsert a batch of posts, one statement per record.
///
/// Uses UPSERT logic (ON CONFLICT DO UPDATE) keyed on `id` so repeated runs
/// converge on a single row per post instead of duplicating. `modified` is
/// set by the database at write time. Statements run in autocommit mode, so
/// rows written before a mid-batch failure stay persisted.
///
/// Returns the number of rows written.
pub async fn upsert_posts(uow: &mut UnitOfWork, posts: &[PostRecord]) -> Result<usize> {
    tracing::info!("Loading posts.");

    let mut rows_written = 0;

    for post in posts {
        sqlx::query(
            r#"
            INSERT INTO posts (id, community, title, score, url, comments, created, text)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT (id)
            DO UPDATE SET
                community = excluded.community,
                title = excluded.title,
                score = excluded.score,
                url = excluded.url,
                comments = excluded.comments,
                created = excluded.created,
                text = excluded.text,
                modified = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&post.id)
        .bind(&post.community)
        .bind(&post.title)
        .bind(post.score)
        .bind(&post.url)
        .bind(post.comments)
        .bind(post.created)
        .bind(&post.text)
        .execute(uow.conn())
        .await
        .context(format!("Failed to upsert post `{}`", post.id))?;

        rows_written += 1;
    }

    tracing::info!("Loaded {} posts", rows_written);
    Ok(rows_written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use chrono::{TimeZone, Utc};

    fn post(id: &str, score: i64, comments: i64) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            community: "rust".to_string(),
            title: format!("post {}", id),
            score,
            url: format!("https://example.com/{}", id),
            comments,
            created: Utc::now(),
            text: "body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_converges_on_one_row() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.create_schema().await.unwrap();

        let mut uow = db.acquire_writer().await.unwrap();
        upsert_posts(&mut uow, &[post("abc", 10, 1)]).await.unwrap();
        upsert_posts(&mut uow, &[post("abc", 99, 1)]).await.unwrap();
        drop(uow);

        let (count, score): (i64, i64) =
            sqlx::query_as("SELECT COUNT(*), MAX(score) FROM posts").fetch_one(db.pool()).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(score, 99);
    }

    #[tokio::test]
    async fn test_stored_row_round_trips() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.create_schema().await.unwrap();

        let mut original = post("abc", 10, 2);
        original.created = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        let mut uow = db.acquire_writer().await.unwrap();
        upsert_posts(&mut uow, &[original.clone()]).await.unwrap();
        drop(uow);

        let stored: PostRecord = sqlx::query_as(
            "SELECT id, community, title, score, url, comments, created, text FROM posts WHERE id = ?1",
        )
        .bind(&original.id)
        .fetch_one(db.pool())
        .await
        .unwrap();

        assert_eq!(stored.id, original.id);
        assert_eq!(stored.score, original.score);
        assert_eq!(stored.created, original.created);
    }

    #[tokio::test]
    async fn test_modified_is_set_by_storage() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.create_schema().await.unwrap();

        let mut uow = db.acquire_writer().await.unwrap();
        upsert_posts(&mut uow, &[post("abc", 1, 0)]).await.unwrap();
        drop(uow);

        let modified: String =
            sqlx::query_scalar("SELECT modified FROM posts WHERE id = 'abc'").fetch_one(db.pool()).await.unwrap();
        assert!(!modified.is_empty());
    }

    #[tokio::test]
    async fn test_loading_an_empty_batch_writes_nothing() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.create_schema().await.unwrap();

        let mut uow = db.acquire_writer().await.unwrap();
        let written = upsert_posts(&mut uow, &[]).await.unwrap();
        drop(uow);

        assert_eq!(written, 0);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts").fetch_one(db.pool()).await.unwrap();
        assert_eq!(count, 0);
    }
}
