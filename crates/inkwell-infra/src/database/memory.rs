//! In-memory store - used when no database is configured, and in tests.
//!
//! Mirrors the relational constraints of the PostgreSQL schema: unique
//! emails, sequential ids, and comments removed with their post.
//! Data is lost on process restart.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use inkwell_core::domain::{Comment, NewComment, NewPost, NewUser, Post, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};

use super::mask_email;

struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    posts: Table<Post>,
    comments: Table<Comment>,
}

/// Shared backing storage for the in-memory repositories.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository(self.clone())
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository(self.clone())
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository(self.clone())
    }
}

pub struct InMemoryUserRepository(InMemoryStore);

pub struct InMemoryPostRepository(InMemoryStore);

pub struct InMemoryCommentRepository(InMemoryStore);

fn email_taken(users: &Table<User>, email: &str, except: Option<i32>) -> bool {
    users
        .rows
        .values()
        .any(|u| u.email == email && Some(u.id) != except)
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.0.tables.read().await.users.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.0.tables.read().await.users.rows.values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.0.tables.write().await;
        if !tables.users.rows.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        if email_taken(&tables.users, &user.email, Some(user.id)) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.users.rows.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.0.tables.write().await;
        if email_taken(&tables.users, &user.email, None) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        let id = tables.users.next_id();
        let user = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
            updated_at: user.created_at,
        };
        tables.users.rows.insert(id, user.clone());

        tracing::debug!(user_id = id, "User inserted");
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let tables = self.0.tables.read().await;
        Ok(tables.users.rows.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables
            .users
            .rows
            .values()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.0.tables.read().await.posts.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.0.tables.read().await.posts.rows.values().cloned().collect())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.0.tables.write().await;
        match tables.posts.rows.get_mut(&post.id) {
            Some(row) => {
                *row = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.0.tables.write().await;
        if !tables.users.rows.contains_key(&post.user_id) {
            return Err(RepoError::Constraint(format!(
                "user {} does not exist",
                post.user_id
            )));
        }

        let id = tables.posts.next_id();
        let post = Post {
            id,
            user_id: post.user_id,
            title: post.title,
            text: post.text,
            created_at: post.created_at,
            updated_at: post.created_at,
        };
        tables.posts.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables
            .posts
            .rows
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.0.tables.write().await;
        if tables.posts.rows.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.comments.rows.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Comment, i32> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError> {
        Ok(self.0.tables.read().await.comments.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Comment>, RepoError> {
        Ok(self
            .0
            .tables
            .read()
            .await
            .comments
            .rows
            .values()
            .cloned()
            .collect())
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.0.tables.write().await;
        match tables.comments.rows.get_mut(&comment.id) {
            Some(row) => {
                *row = comment.clone();
                Ok(comment)
            }
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.0.tables.write().await;
        if !tables.posts.rows.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                comment.post_id
            )));
        }
        if !tables.users.rows.contains_key(&comment.user_id) {
            return Err(RepoError::Constraint(format!(
                "user {} does not exist",
                comment.user_id
            )));
        }

        let id = tables.comments.next_id();
        let comment = Comment {
            id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            text: comment.text,
            created_at: comment.created_at,
            updated_at: comment.created_at,
        };
        tables.comments.rows.insert(id, comment.clone());
        Ok(comment)
    }

    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables
            .comments
            .rows
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Comment>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables
            .comments
            .rows
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_by_post_ids(&self, post_ids: &[i32]) -> Result<HashMap<i32, u64>, RepoError> {
        let tables = self.0.tables.read().await;
        let mut counts = HashMap::new();
        for comment in tables.comments.rows.values() {
            if post_ids.contains(&comment.post_id) {
                *counts.entry(comment.post_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_user(store: &InMemoryStore, email: &str) -> User {
        store
            .users()
            .create(NewUser::new(email.to_string(), "hash".to_string()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = InMemoryStore::new();
        let a = seed_user(&store, "a@example.com").await;
        let b = seed_user(&store, "b@example.com").await;

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_constraint_violation() {
        let store = InMemoryStore::new();
        seed_user(&store, "a@example.com").await;

        let result = store
            .users()
            .create(NewUser::new("a@example.com".to_string(), "x".to_string()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert_eq!(store.users().find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_to_other_users_email_is_rejected() {
        let store = InMemoryStore::new();
        seed_user(&store, "a@example.com").await;
        let mut b = seed_user(&store, "b@example.com").await;

        b.email = "a@example.com".to_string();
        let result = store.users().update(b).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "a@example.com").await;
        let mut post = store
            .posts()
            .create(NewPost::new(user.id, "t".to_string(), "x".to_string()))
            .await
            .unwrap();
        store.posts().delete(post.id).await.unwrap();

        post.title = "changed".to_string();
        assert!(matches!(
            store.posts().update(post).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_post_removes_its_comments() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "a@example.com").await;
        let post = store
            .posts()
            .create(NewPost::new(user.id, "t".to_string(), "x".to_string()))
            .await
            .unwrap();
        store
            .comments()
            .create(NewComment::new(post.id, user.id, "c".to_string()))
            .await
            .unwrap();

        store.posts().delete(post.id).await.unwrap();

        assert!(store.comments().find_all().await.unwrap().is_empty());
        assert!(matches!(
            store.posts().delete(post.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_count_by_post_ids() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "a@example.com").await;
        let first = store
            .posts()
            .create(NewPost::new(user.id, "1".to_string(), "x".to_string()))
            .await
            .unwrap();
        let second = store
            .posts()
            .create(NewPost::new(user.id, "2".to_string(), "x".to_string()))
            .await
            .unwrap();
        for _ in 0..2 {
            store
                .comments()
                .create(NewComment::new(first.id, user.id, "c".to_string()))
                .await
                .unwrap();
        }

        let counts = store
            .comments()
            .count_by_post_ids(&[first.id, second.id])
            .await
            .unwrap();

        assert_eq!(counts.get(&first.id), Some(&2));
        assert_eq!(counts.get(&second.id), None);
    }

    #[tokio::test]
    async fn test_comment_requires_existing_post() {
        let store = InMemoryStore::new();
        let user = seed_user(&store, "a@example.com").await;

        let result = store
            .comments()
            .create(NewComment::new(42, user.id, "c".to_string()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
