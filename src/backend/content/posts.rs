/**
 * Post Queries
 *
 * SQL for creating and listing posts. Every read joins `users` so the
 * returned rows already carry the author's username.
 *
 * Listings are ordered newest first; rows with the same timestamp fall back
 * to the id, which grows with insertion order.
 */

use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use sqlx::SqlitePool;

use crate::shared::models::{Post, PostId, UserId};

/// Insert a post
///
/// # Returns
/// Id of the created post
pub async fn insert_post(
    pool: &SqlitePool,
    title: &str,
    content: &str,
    author_id: UserId,
    created_at: DateTime<Utc>,
) -> Result<PostId, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO posts (title, content, author_id, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(author_id)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(PostId(id))
}

/// Get one post by id
pub async fn get_post_by_id(pool: &SqlitePool, id: PostId) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.title, p.content, p.author_id, u.username AS author_name, p.created_at
        FROM posts p
        JOIN users u ON p.author_id = u.id
        WHERE p.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Most recent posts, newest first
pub async fn recent_posts(pool: &SqlitePool, limit: u32) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.title, p.content, p.author_id, u.username AS author_name, p.created_at
        FROM posts p
        JOIN users u ON p.author_id = u.id
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT ?
        "#,
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await
}

/// All posts of one author, newest first
pub async fn posts_by_author(
    pool: &SqlitePool,
    author_id: UserId,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.title, p.content, p.author_id, u.username AS author_name, p.created_at
        FROM posts p
        JOIN users u ON p.author_id = u.id
        WHERE p.author_id = ?
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await
}

/// Posts whose title or content contains `needle`, newest first
///
/// `needle` must already be lower-cased with `str::to_lowercase`. SQLite's
/// `lower` only folds ASCII, so rows are streamed newest first and matched
/// here with the same Unicode folding. `%` and `_` are ordinary characters.
pub async fn search_posts(
    pool: &SqlitePool,
    needle: &str,
    limit: u32,
) -> Result<Vec<Post>, sqlx::Error> {
    let limit = limit as usize;
    let mut found = Vec::new();
    if limit == 0 {
        return Ok(found);
    }

    let mut rows = sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.title, p.content, p.author_id, u.username AS author_name, p.created_at
        FROM posts p
        JOIN users u ON p.author_id = u.id
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )
    .fetch(pool);

    while let Some(post) = rows.try_next().await? {
        if contains_folded(&post.title, needle) || contains_folded(&post.content, needle) {
            found.push(post);
            if found.len() == limit {
                break;
            }
        }
    }

    Ok(found)
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
