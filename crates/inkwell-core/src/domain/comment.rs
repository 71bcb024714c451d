use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - a reply to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub user_id: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i32,
    pub user_id: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn new(post_id: i32, user_id: i32, text: String) -> Self {
        Self {
            post_id,
            user_id,
            text,
            created_at: Utc::now(),
        }
    }
}
