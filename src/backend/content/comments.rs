/**
 * Comment Queries
 *
 * Comment threads read oldest first, the opposite of post listings.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::shared::models::{Comment, CommentId, PostId, UserId};

/// Insert a comment on a post
pub async fn insert_comment(
    pool: &SqlitePool,
    post_id: PostId,
    content: &str,
    author_id: UserId,
    created_at: DateTime<Utc>,
) -> Result<CommentId, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO comments (content, post_id, author_id, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(content)
    .bind(post_id)
    .bind(author_id)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(CommentId(id))
}

/// Comments of a post in reading order
pub async fn comments_for_post(
    pool: &SqlitePool,
    post_id: PostId,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.content, c.post_id, c.author_id, u.username AS author_name, c.created_at
        FROM comments c
        JOIN users u ON c.author_id = u.id
        WHERE c.post_id = ?
        ORDER BY c.created_at ASC, c.id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}
