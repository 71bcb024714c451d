use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

use inkwell_core::domain::{NewPost, NewUser, Post, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BaseRepository, PostRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_base::map_db_err;
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn post_model(id: i32, user_id: i32) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        user_id,
        title: "Test Post".to_owned(),
        text: "Content".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn user_model(id: i32, email: &str) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        email: email.to_owned(),
        password_hash: "hash".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(1, 3)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post: Option<Post> = repo.find_by_id(1).await.unwrap();

    let post = post.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 1);
    assert_eq!(post.user_id, 3);
}

#[tokio::test]
async fn test_find_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post: Option<Post> = repo.find_by_id(1).await.unwrap();
    assert!(post.is_none());
}

#[tokio::test]
async fn test_create_post_returns_assigned_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(5, 3)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo
        .create(NewPost::new(3, "Test Post".to_owned(), "Content".to_owned()))
        .await
        .unwrap();

    assert_eq!(post.id, 5);
    assert_eq!(post.user_id, 3);
}

#[tokio::test]
async fn test_find_user_by_email() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_model(2, "jane@example.com")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user: Option<User> = repo.find_by_email("jane@example.com").await.unwrap();

    let user = user.unwrap();
    assert_eq!(user.id, 2);
    assert_eq!(user.email, "jane@example.com");
}

#[tokio::test]
async fn test_create_user() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_model(1, "jane@example.com")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo
        .create(NewUser::new("jane@example.com".to_owned(), "hash".to_owned()))
        .await
        .unwrap();

    assert_eq!(user.id, 1);
}

#[tokio::test]
async fn test_find_by_ids_skips_query_when_empty() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let repo = PostgresUserRepository::new(db);

    assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo.delete(1).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo.delete(1).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_repositories_share_one_connection() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model(3, "jane@example.com")]])
            .append_query_results([vec![post_model(1, 3)]])
            .into_connection(),
    );

    let users = PostgresUserRepository::new(db.clone());
    let posts = PostgresPostRepository::new(db);

    let user: Option<User> = users.find_by_id(3).await.unwrap();
    let post: Option<Post> = posts.find_by_id(1).await.unwrap();

    assert_eq!(user.unwrap().id, 3);
    assert_eq!(post.unwrap().user_id, 3);
}

#[test]
fn test_map_db_err_ignores_message_text() {
    assert!(matches!(
        map_db_err(DbErr::Custom("duplicate key value violates unique constraint".to_owned())),
        RepoError::Query(_)
    ));
    assert!(matches!(
        map_db_err(DbErr::RecordNotFound("post".to_owned())),
        RepoError::NotFound
    ));
    assert!(matches!(map_db_err(DbErr::RecordNotUpdated), RepoError::NotFound));
}
