//! In-process revoked-token list.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use inkwell_core::ports::TokenBlocklist;

/// Revoked token ids, each kept until the token would have expired anyway.
///
/// Local to one process: with several server instances, a revocation only
/// takes effect on the instance that handled it.
#[derive(Default)]
pub struct InMemoryTokenBlocklist {
    revoked: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryTokenBlocklist {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenBlocklist for InMemoryTokenBlocklist {
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) {
        let now = Utc::now();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        if expires_at > now {
            revoked.insert(token_id.to_string(), expires_at);
        }
    }

    async fn is_revoked(&self, token_id: &str) -> bool {
        self.revoked
            .read()
            .await
            .get(token_id)
            .is_some_and(|exp| *exp > Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[tokio::test]
    async fn test_revoke_and_check() {
        let list = InMemoryTokenBlocklist::new();
        list.revoke("abc", Utc::now() + TimeDelta::hours(1)).await;

        assert!(list.is_revoked("abc").await);
        assert!(!list.is_revoked("def").await);
    }

    #[tokio::test]
    async fn test_expired_entries_are_dropped() {
        let list = InMemoryTokenBlocklist::new();
        list.revoke("old", Utc::now() - TimeDelta::seconds(1)).await;

        assert!(!list.is_revoked("old").await);
        assert!(list.revoked.read().await.is_empty());
    }
}
