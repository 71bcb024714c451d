//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are all optional so that a missing field reaches the
//! validation rules (422) instead of failing deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Self-service profile edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of `POST /posts` and `PUT /posts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: Option<String>,
}

/// Query string of `GET /posts/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostQuery {
    pub comments: Option<String>,
}

impl PostQuery {
    /// `?comments=1`, `?comments=true`, ... ; `0`, `false` and empty mean no.
    pub fn with_comments(&self) -> bool {
        match self.comments.as_deref().map(str::trim) {
            None | Some("") | Some("0") => false,
            Some(v) => !v.eq_ignore_ascii_case("false"),
        }
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i32,
    pub post_id: i32,
    pub user_id: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a post. The owner appears as `user`, never as `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comments_count: u64,
    pub user: UserResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentResponse>>,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

impl AuthResponse {
    pub fn bearer(access_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_flag() {
        let q = |v: Option<&str>| PostQuery {
            comments: v.map(str::to_string),
        };

        assert!(!q(None).with_comments());
        assert!(!q(Some("")).with_comments());
        assert!(!q(Some("0")).with_comments());
        assert!(!q(Some("FALSE")).with_comments());
        assert!(q(Some("1")).with_comments());
        assert!(q(Some("true")).with_comments());
    }

    #[test]
    fn test_post_response_hides_owner_id() {
        let now = Utc::now();
        let post = PostResponse {
            id: 1,
            title: "t".to_string(),
            text: "x".to_string(),
            created_at: now,
            updated_at: now,
            comments_count: 0,
            user: UserResponse {
                id: 2,
                email: "a@b.com".to_string(),
                created_at: now,
                updated_at: now,
            },
            comments: None,
        };

        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("user_id").is_none());
        assert!(json.get("comments").is_none());
        assert_eq!(json["user"]["id"], 2);
        assert!(json["user"].get("password").is_none());
    }

    #[test]
    fn test_missing_request_fields_deserialize_to_none() {
        let req: PostRequest = serde_json::from_str(r#"{"title":"tit"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("tit"));
        assert!(req.text.is_none());
    }
}
