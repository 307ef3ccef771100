//! Forum service integration tests
//!
//! Exercise the service over the real SQLite stores.

mod common;

use agora_forum::backend::auth::sessions::Session;
use agora_forum::backend::auth::users::CredentialStore;
use agora_forum::backend::auth::users::SqliteCredentialStore;
use agora_forum::shared::error::ForumError;
use agora_forum::shared::models::{PostId, PREVIEW_CHARS};
use assert_matches::assert_matches;
use common::database::{TestDatabase, TEST_BCRYPT_COST};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_register_login_post_view_round_trip() {
    let db = TestDatabase::new().await;
    let service = db.service().await;

    service
        .register("alice", "alice@example.com", "pw1")
        .await
        .unwrap();

    let mut session = Session::new();
    service.login(&mut session, "alice", "pw1").await.unwrap();

    let id = service
        .create_post(&session, "Hello", "First post")
        .await
        .unwrap();
    let view = service.view_post(&session, id).await.unwrap();

    assert_eq!(view.post.author_name, "alice");
    assert_eq!(view.post.title, "Hello");
    assert_eq!(view.post.content, "First post");
    assert!(view.comments.is_empty());
    assert_eq!(view.viewer.username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let db = TestDatabase::new().await;
    let service = db.service().await;

    service.register("alice", "a@x.com", "pw1").await.unwrap();
    let second = service.register("alice", "b@y.com", "pw2").await;

    assert_matches!(
        second,
        Err(ForumError::Conflict { message }) if message == "Username or email already taken"
    );
    assert_eq!(db.count("users").await, 1);
}

#[tokio::test]
async fn test_duplicate_email_conflicts_with_same_message() {
    let db = TestDatabase::new().await;
    let service = db.service().await;

    service.register("alice", "a@x.com", "pw1").await.unwrap();
    let by_email = service.register("bob", "a@x.com", "pw2").await.unwrap_err();
    let by_name = service.register("alice", "c@z.com", "pw2").await.unwrap_err();

    assert_eq!(by_email.public_message(), by_name.public_message());
}

#[tokio::test]
async fn test_verify_after_registration() {
    let db = TestDatabase::new().await;
    let store = SqliteCredentialStore::new(db.db().clone(), TEST_BCRYPT_COST)
        .await
        .unwrap();

    let id = store.register("alice", "a@x.com", "pw1").await.unwrap();
    assert_eq!(store.verify("alice", "pw1").await.unwrap(), id);
    assert_matches!(
        store.verify("alice", "wrong").await,
        Err(ForumError::Authentication)
    );
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_look_identical() {
    let db = TestDatabase::new().await;
    let service = db.service().await;
    service.register("alice", "a@x.com", "pw1").await.unwrap();

    let mut session = Session::new();
    let unknown = service
        .login(&mut session, "nobody", "pw1")
        .await
        .unwrap_err();
    let wrong = service
        .login(&mut session, "alice", "nope")
        .await
        .unwrap_err();

    assert_eq!(unknown, wrong);
    assert_eq!(unknown.public_message(), "Invalid username or password");
}

#[tokio::test]
async fn test_guarded_operations_do_not_mutate_storage() {
    let db = TestDatabase::new().await;
    let service = db.service().await;

    service.register("alice", "a@x.com", "pw").await.unwrap();
    let mut author = Session::new();
    service.login(&mut author, "alice", "pw").await.unwrap();
    let post = service.create_post(&author, "t", "c").await.unwrap();

    let anonymous = Session::new();
    assert_matches!(
        service.create_post(&anonymous, "t2", "c2").await,
        Err(ForumError::NotAuthenticated)
    );
    assert_matches!(
        service.add_comment(&anonymous, post, "hi").await,
        Err(ForumError::NotAuthenticated)
    );

    assert_eq!(db.count("posts").await, 1);
    assert_eq!(db.count("comments").await, 0);
}

#[tokio::test]
async fn test_logged_out_session_is_guarded_again() {
    let db = TestDatabase::new().await;
    let service = db.service().await;

    service.register("alice", "a@x.com", "pw").await.unwrap();
    let mut session = Session::new();
    service.login(&mut session, "alice", "pw").await.unwrap();
    service.logout(&mut session).unwrap();

    assert_matches!(
        service.create_post(&session, "t", "c").await,
        Err(ForumError::NotAuthenticated)
    );
}

#[tokio::test]
async fn test_comment_thread_reads_oldest_first() {
    let db = TestDatabase::new().await;
    let service = db.service().await;

    service.register("alice", "a@x.com", "pw").await.unwrap();
    service.register("bob", "b@x.com", "pw").await.unwrap();
    let mut alice = Session::new();
    service.login(&mut alice, "alice", "pw").await.unwrap();
    let mut bob = Session::new();
    service.login(&mut bob, "bob", "pw").await.unwrap();

    let post = service.create_post(&alice, "Topic", "Discuss").await.unwrap();
    service.add_comment(&bob, post, "one").await.unwrap();
    service.add_comment(&alice, post, "two").await.unwrap();
    service.add_comment(&bob, post, "three").await.unwrap();

    let view = service.view_post(&Session::new(), post).await.unwrap();
    let thread: Vec<(&str, &str)> = view
        .comments
        .iter()
        .map(|c| (c.author_name.as_str(), c.content.as_str()))
        .collect();
    assert_eq!(
        thread,
        vec![("bob", "one"), ("alice", "two"), ("bob", "three")]
    );
}

#[tokio::test]
async fn test_comment_on_missing_post_is_reference_error() {
    let db = TestDatabase::new().await;
    let service = db.service().await;

    service.register("alice", "a@x.com", "pw").await.unwrap();
    let mut session = Session::new();
    service.login(&mut session, "alice", "pw").await.unwrap();

    assert_matches!(
        service.add_comment(&session, PostId(404), "hi").await,
        Err(ForumError::Reference { .. })
    );
}

#[tokio::test]
async fn test_profile_lists_previews_newest_first() {
    let db = TestDatabase::new().await;
    let service = db.service().await;

    service.register("alice", "a@x.com", "pw").await.unwrap();
    let mut session = Session::new();
    service.login(&mut session, "alice", "pw").await.unwrap();

    let long = "z".repeat(200);
    service.create_post(&session, "old", &long).await.unwrap();
    service.create_post(&session, "new", "short").await.unwrap();

    let profile = service.view_profile(&Session::new(), "alice").await.unwrap();
    assert_eq!(profile.post_count, 2);
    assert!(!profile.is_owner);
    assert_eq!(profile.user.email, None);
    assert_eq!(profile.posts[0].title, "new");
    assert_eq!(profile.posts[1].content.chars().count(), PREVIEW_CHARS + 3);
    assert!(profile.posts[1].content.ends_with("..."));
}

#[tokio::test]
async fn test_search_example() {
    let db = TestDatabase::new().await;
    let service = db.service().await;

    service.register("alice", "a@x.com", "pw").await.unwrap();
    let mut session = Session::new();
    service.login(&mut session, "alice", "pw").await.unwrap();

    service
        .create_post(&session, "Cats and Dogs", "pets")
        .await
        .unwrap();
    service
        .create_post(&session, "Strings", "how to concatenate")
        .await
        .unwrap();
    service
        .create_post(&session, "Dogs", "just dogs")
        .await
        .unwrap();

    let view = service.search(&session, "cat").await.unwrap();
    let titles: Vec<&str> = view.posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Strings", "Cats and Dogs"]);
    assert_eq!(view.result_count, 2);

    let empty = service.search(&session, "").await.unwrap();
    assert!(empty.posts.is_empty());
}

#[tokio::test]
async fn test_concurrent_registrations_single_winner() {
    let db = TestDatabase::new().await;
    let service = std::sync::Arc::new(db.service().await);

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .register("racer", &format!("racer{}@x.com", i), "pw")
                .await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(err) => assert_matches!(err, ForumError::Conflict { .. }),
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(db.count("users").await, 1);
}
