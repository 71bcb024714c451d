use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - an account that owns posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Apply a self-service edit. `None` keeps the stored value.
    pub fn apply(&mut self, email: Option<String>, password_hash: Option<String>) {
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(password_hash) = password_hash {
            self.password_hash = password_hash;
        }
        self.updated_at = Utc::now();
    }
}

/// A user that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let created = Utc::now() - chrono::TimeDelta::minutes(5);
        User {
            id: 1,
            email: "old@example.com".to_string(),
            password_hash: "hash".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_apply_keeps_omitted_fields() {
        let mut user = user();
        user.apply(None, Some("new-hash".to_string()));

        assert_eq!(user.email, "old@example.com");
        assert_eq!(user.password_hash, "new-hash");
        assert!(user.updated_at > user.created_at);
    }

    #[test]
    fn test_apply_email_only() {
        let mut user = user();
        user.apply(Some("new@example.com".to_string()), None);

        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.password_hash, "hash");
    }
}
