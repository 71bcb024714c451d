use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{Comment, NewComment, NewPost, NewUser, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining the shared CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities, ordered by ID.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Overwrite an existing entity. `RepoError::NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Insert a user. A taken email is `RepoError::Constraint`.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Post>, RepoError>;

    /// Delete a post together with its comments.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i32> {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    async fn find_by_post_id(&self, post_id: i32) -> Result<Vec<Comment>, RepoError>;

    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Comment>, RepoError>;

    /// Comment count per post. Posts without comments may be absent.
    async fn count_by_post_ids(&self, post_ids: &[i32]) -> Result<HashMap<i32, u64>, RepoError>;
}
