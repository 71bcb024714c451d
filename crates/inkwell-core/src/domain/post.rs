use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Comment, User};

/// Post entity - a titled text owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated partial update for a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub text: Option<String>,
}

impl Post {
    /// Apply a partial update. The owner never changes.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(text) = changes.text {
            self.text = text;
        }
        self.updated_at = Utc::now();
    }
}

/// A post that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i32,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(user_id: i32, title: String, text: String) -> Self {
        Self {
            user_id,
            title,
            text,
            created_at: Utc::now(),
        }
    }
}

/// Read model of a post: the row plus its author and comment count,
/// and optionally the comments themselves.
#[derive(Debug, Clone)]
pub struct PostDetails {
    pub post: Post,
    pub author: User,
    pub comments_count: u64,
    pub comments: Option<Vec<Comment>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        let now = Utc::now();
        Post {
            id: 7,
            user_id: 3,
            title: "title".to_string(),
            text: "text".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_empty_changes_keeps_content() {
        let mut post = post();
        post.apply(PostChanges::default());

        assert_eq!(post.title, "title");
        assert_eq!(post.text, "text");
        assert_eq!(post.user_id, 3);
    }

    #[test]
    fn test_apply_title_only() {
        let mut post = post();
        post.apply(PostChanges {
            title: Some("tit".to_string()),
            text: None,
        });

        assert_eq!(post.title, "tit");
        assert_eq!(post.text, "text");
    }
}
