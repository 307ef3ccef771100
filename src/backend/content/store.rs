/**
 * Content Store
 *
 * This module defines the `ContentStore` seam and its SQLite
 * implementation. The forum service only sees the trait, so tests can swap
 * in another implementation.
 *
 * # Ordering
 *
 * - Post listings: newest first
 * - Comment threads: oldest first (reading order)
 *
 * # Integrity
 *
 * Author and post references are checked by the FOREIGN KEY constraints at
 * insert time; a violation surfaces as `ForumError::Reference`.
 */

use async_trait::async_trait;
use chrono::Utc;

use crate::backend::content::{comments, posts};
use crate::backend::db::{Database, StoreError};
use crate::shared::error::{require, ForumError};
use crate::shared::models::{Comment, CommentId, Post, PostId, UserId};

/// Post and comment persistence
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Create a post
    ///
    /// # Errors
    /// * `Validation` - empty title or content
    /// * `Reference` - `author_id` does not exist
    async fn create_post(
        &self,
        title: &str,
        content: &str,
        author_id: UserId,
    ) -> Result<PostId, ForumError>;

    /// Fetch one post (`NotFound` if absent)
    async fn get_post(&self, id: PostId) -> Result<Post, ForumError>;

    /// At most `limit` posts, newest first
    async fn list_recent_posts(&self, limit: u32) -> Result<Vec<Post>, ForumError>;

    /// Posts of one author, newest first, content cut to the preview length
    async fn list_posts_by_author(&self, author_id: UserId) -> Result<Vec<Post>, ForumError>;

    /// Case-insensitive substring search over title and content
    ///
    /// An empty query matches nothing.
    async fn search_posts(&self, query: &str, limit: u32) -> Result<Vec<Post>, ForumError>;

    /// Comment on a post
    ///
    /// # Errors
    /// * `Validation` - empty content
    /// * `Reference` - `post_id` or `author_id` does not exist
    async fn add_comment(
        &self,
        post_id: PostId,
        content: &str,
        author_id: UserId,
    ) -> Result<CommentId, ForumError>;

    /// Comments of a post, oldest first
    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ForumError>;
}

/// SQLite-backed content store
#[derive(Debug, Clone)]
pub struct SqliteContentStore {
    db: Database,
}

impl SqliteContentStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn dangling(entity: &'static str) -> impl Fn(StoreError) -> ForumError {
    move |err| match err {
        StoreError::ForeignKeyViolation(detail) => {
            tracing::error!("Dangling {} reference: {}", entity, detail);
            ForumError::reference(entity)
        }
        other => other.into(),
    }
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn create_post(
        &self,
        title: &str,
        content: &str,
        author_id: UserId,
    ) -> Result<PostId, ForumError> {
        require("title", title, "Title is required")?;
        require("content", content, "Content is required")?;

        let id = self
            .db
            .run(
                "insert_post",
                posts::insert_post(self.db.pool(), title, content, author_id, Utc::now()),
            )
            .await
            .map_err(dangling("user"))?;

        tracing::info!("Post {} created by user {}", id, author_id);
        Ok(id)
    }

    async fn get_post(&self, id: PostId) -> Result<Post, ForumError> {
        self.db
            .run("get_post_by_id", posts::get_post_by_id(self.db.pool(), id))
            .await?
            .ok_or_else(|| ForumError::not_found("Post"))
    }

    async fn list_recent_posts(&self, limit: u32) -> Result<Vec<Post>, ForumError> {
        Ok(self
            .db
            .run("recent_posts", posts::recent_posts(self.db.pool(), limit))
            .await?)
    }

    async fn list_posts_by_author(&self, author_id: UserId) -> Result<Vec<Post>, ForumError> {
        let found = self
            .db
            .run("posts_by_author", posts::posts_by_author(self.db.pool(), author_id))
            .await?;
        Ok(found.into_iter().map(Post::into_preview).collect())
    }

    async fn search_posts(&self, query: &str, limit: u32) -> Result<Vec<Post>, ForumError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        let found = self
            .db
            .run("search_posts", posts::search_posts(self.db.pool(), &needle, limit))
            .await?;

        tracing::debug!("Search '{}' matched {} posts", query, found.len());
        Ok(found.into_iter().map(Post::into_preview).collect())
    }

    async fn add_comment(
        &self,
        post_id: PostId,
        content: &str,
        author_id: UserId,
    ) -> Result<CommentId, ForumError> {
        require("content", content, "Comment content is required")?;

        let id = self
            .db
            .run(
                "insert_comment",
                comments::insert_comment(self.db.pool(), post_id, content, author_id, Utc::now()),
            )
            .await
            .map_err(dangling("post or user"))?;

        tracing::info!("Comment {} added to post {} by user {}", id, post_id, author_id);
        Ok(id)
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, ForumError> {
        Ok(self
            .db
            .run("comments_for_post", comments::comments_for_post(self.db.pool(), post_id))
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::create_user;
    use crate::shared::models::{ELLIPSIS, PREVIEW_CHARS};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    async fn store() -> (tempfile::TempDir, SqliteContentStore, UserId) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("forum.db"), Duration::from_secs(5))
            .await
            .unwrap();
        let author = create_user(db.pool(), "alice", "a@x.com", "$2b$04$hash", Utc::now())
            .await
            .unwrap();
        (dir, SqliteContentStore::new(db), author)
    }

    #[tokio::test]
    async fn test_create_and_get_post() {
        let (_dir, store, author) = store().await;
        let id = store.create_post("Hello", "World", author).await.unwrap();
        let post = store.get_post(id).await.unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");
        assert_eq!(post.author_id, author);
        assert_eq!(post.author_name, "alice");
    }

    #[tokio::test]
    async fn test_create_post_validates_fields() {
        let (_dir, store, author) = store().await;
        assert_matches!(
            store.create_post("", "body", author).await,
            Err(ForumError::Validation { field, .. }) if field == "title"
        );
        assert_matches!(
            store.create_post("title", "", author).await,
            Err(ForumError::Validation { field, .. }) if field == "content"
        );
        assert!(store.list_recent_posts(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_post_unknown_author() {
        let (_dir, store, _author) = store().await;
        let result = store.create_post("t", "c", UserId(9999)).await;
        assert_matches!(result, Err(ForumError::Reference { entity }) if entity == "user");
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let (_dir, store, _author) = store().await;
        assert_matches!(store.get_post(PostId(1)).await, Err(ForumError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_recent_posts_newest_first_and_bounded() {
        let (_dir, store, author) = store().await;
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(store.create_post(&format!("post {}", i), "c", author).await.unwrap());
        }
        let listed = store.list_recent_posts(3).await.unwrap();
        let listed_ids: Vec<PostId> = listed.iter().map(|p| p.id).collect();
        assert_eq!(listed_ids, vec![ids[4], ids[3], ids[2]]);
        assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_posts_by_author_truncates_content() {
        let (_dir, store, author) = store().await;
        let long = "x".repeat(200);
        let short = "y".repeat(100);
        store.create_post("long", &long, author).await.unwrap();
        store.create_post("short", &short, author).await.unwrap();

        let listed = store.list_posts_by_author(author).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].content, short);
        assert_eq!(listed[1].content, format!("{}{}", "x".repeat(PREVIEW_CHARS), ELLIPSIS));

        // Full content is still stored
        assert_eq!(store.get_post(listed[1].id).await.unwrap().content, long);
    }

    #[tokio::test]
    async fn test_search_matches_title_or_content() {
        let (_dir, store, author) = store().await;
        let cats = store.create_post("Cats and Dogs", "pets", author).await.unwrap();
        let concat = store
            .create_post("Strings", "How to concatenate text", author)
            .await
            .unwrap();
        store.create_post("Dogs", "only dogs here", author).await.unwrap();

        let found: Vec<PostId> = store
            .search_posts("cat", 20)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(found, vec![concat, cats]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let (_dir, store, author) = store().await;
        store.create_post("RUST", "body", author).await.unwrap();
        assert_eq!(store.search_posts("rust", 20).await.unwrap().len(), 1);
        assert_eq!(store.search_posts("RuSt", 20).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_search_matches_nothing() {
        let (_dir, store, author) = store().await;
        store.create_post("anything", "at all", author).await.unwrap();
        assert!(store.search_posts("", 20).await.unwrap().is_empty());
        assert!(store.search_posts("   ", 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_wildcards_are_literal() {
        let (_dir, store, author) = store().await;
        store.create_post("plain", "nothing special", author).await.unwrap();
        store.create_post("discount", "50% off", author).await.unwrap();
        let found = store.search_posts("%", 20).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "discount");
    }

    #[tokio::test]
    async fn test_search_matches_non_ascii() {
        let (_dir, store, author) = store().await;
        store.create_post("École ouverte", "Über alles", author).await.unwrap();
        store.create_post("plain", "ascii only", author).await.unwrap();

        for query in ["École", "école", "ÉCOLE", "Über", "über"] {
            let found = store.search_posts(query, 20).await.unwrap();
            assert_eq!(found.len(), 1, "query {:?}", query);
            assert_eq!(found[0].title, "École ouverte");
        }
    }

    #[tokio::test]
    async fn test_search_respects_limit_newest_first() {
        let (_dir, store, author) = store().await;
        let mut ids = Vec::new();
        for i in 0..4 {
            ids.push(store.create_post(&format!("match {}", i), "c", author).await.unwrap());
        }
        store.create_post("other", "c", author).await.unwrap();

        let found: Vec<PostId> = store
            .search_posts("match", 2)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(found, vec![ids[3], ids[2]]);
    }

    #[tokio::test]
    async fn test_search_results_are_previews() {
        let (_dir, store, author) = store().await;
        let long = "é".repeat(200);
        let id = store.create_post("Needle", &long, author).await.unwrap();

        let found = store.search_posts("needle", 20).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].content, format!("{}{}", "é".repeat(PREVIEW_CHARS), ELLIPSIS));
        assert_eq!(found[0].content.chars().count(), PREVIEW_CHARS + 3);

        assert_eq!(store.get_post(id).await.unwrap().content, long);
    }

    #[tokio::test]
    async fn test_comments_oldest_first() {
        let (_dir, store, author) = store().await;
        let post = store.create_post("t", "c", author).await.unwrap();
        let first = store.add_comment(post, "first", author).await.unwrap();
        let second = store.add_comment(post, "second", author).await.unwrap();

        let thread = store.list_comments(post).await.unwrap();
        let ids: Vec<CommentId> = thread.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(thread[0].author_name, "alice");
        assert_eq!(thread[0].post_id, post);
    }

    #[tokio::test]
    async fn test_add_comment_validation_and_references() {
        let (_dir, store, author) = store().await;
        let post = store.create_post("t", "c", author).await.unwrap();

        assert_matches!(
            store.add_comment(post, "", author).await,
            Err(ForumError::Validation { .. })
        );
        assert_matches!(
            store.add_comment(PostId(9999), "hi", author).await,
            Err(ForumError::Reference { .. })
        );
        assert_matches!(
            store.add_comment(post, "hi", UserId(9999)).await,
            Err(ForumError::Reference { .. })
        );
        assert!(store.list_comments(post).await.unwrap().is_empty());
    }
}
