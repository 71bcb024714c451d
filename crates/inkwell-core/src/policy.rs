//! Ownership-based authorization.
//!
//! Pure policy checks: no IO, no request context. The requester is passed
//! explicitly by the caller.

use crate::domain::{Comment, Post, User};
use crate::error::DomainError;

/// A resource that belongs to exactly one user.
pub trait Owned {
    fn owner_id(&self) -> i32;
}

impl Owned for Post {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

/// A user record is owned by that user.
impl Owned for User {
    fn owner_id(&self) -> i32 {
        self.id
    }
}

/// Whether `requester` may edit or delete `resource`.
/// An anonymous requester may edit nothing.
pub fn can_edit<R: Owned + ?Sized>(requester: Option<i32>, resource: &R) -> bool {
    requester.is_some_and(|id| id == resource.owner_id())
}

/// [`can_edit`] as a `Result`, for use with `?` in handlers.
///
/// A non-owner gets the same `Unauthorized` as an anonymous caller.
pub fn authorize_edit<R: Owned + ?Sized>(
    requester: Option<i32>,
    resource: &R,
) -> Result<(), DomainError> {
    if can_edit(requester, resource) {
        Ok(())
    } else {
        Err(DomainError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_owned_by(user_id: i32) -> Post {
        let now = Utc::now();
        Post {
            id: 1,
            user_id,
            title: "t".to_string(),
            text: "x".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_owner_can_edit_post() {
        assert!(can_edit(Some(4), &post_owned_by(4)));
    }

    #[test]
    fn test_other_user_cannot_edit_post() {
        assert!(!can_edit(Some(5), &post_owned_by(4)));
    }

    #[test]
    fn test_anonymous_cannot_edit() {
        assert!(!can_edit(None, &post_owned_by(4)));
    }

    #[test]
    fn test_user_owns_own_record() {
        let now = Utc::now();
        let user = User {
            id: 9,
            email: "a@b.com".to_string(),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        };

        assert!(authorize_edit(Some(9), &user).is_ok());
        assert!(matches!(
            authorize_edit(Some(10), &user),
            Err(DomainError::Unauthorized)
        ));
    }
}
