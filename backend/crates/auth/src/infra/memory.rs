//! In-Memory Repository Implementation
//!
//! Backs the router tests and the client crate's end-to-end tests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_where(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users.read().await.values().find(|u| pred(u)).cloned()
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.find_where(|u| &u.email == email).await)
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.find_where(|u| &u.email == email).await.is_some())
    }

    async fn find_by_verification_token(&self, digest: &str) -> AuthResult<Option<User>> {
        Ok(self
            .find_where(|u| u.verification.as_ref().is_some_and(|t| t.digest == digest))
            .await)
    }

    async fn find_by_reset_token(&self, digest: &str) -> AuthResult<Option<User>> {
        Ok(self
            .find_where(|u| u.password_reset.as_ref().is_some_and(|t| t.digest == digest))
            .await)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.user_id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(AuthError::UserNotFound),
        }
    }

    async fn replace_refresh_token(
        &self,
        user_id: &UserId,
        expected: &str,
        new: Option<&str>,
    ) -> AuthResult<bool> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(user_id) else {
            return Ok(false);
        };
        if user.refresh_token_digest.as_deref() != Some(expected) {
            return Ok(false);
        }
        user.set_refresh_token(new.map(str::to_string));
        Ok(true)
    }

    async fn cleanup_expired_tokens(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut cleared = 0;
        for user in self.users.write().await.values_mut() {
            if user.verification.as_ref().is_some_and(|t| !t.is_live(now)) {
                user.verification = None;
                cleared += 1;
            }
            if user.password_reset.as_ref().is_some_and(|t| !t.is_live(now)) {
                user.password_reset = None;
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        one_time_token::OneTimeToken,
        user_password::{RawPassword, UserPassword},
    };
    use chrono::Duration;

    fn user(email: &str, verification_ttl: Duration) -> User {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let (_, verification) = OneTimeToken::issue(verification_ttl);
        User::new(
            Email::new(email).unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            verification,
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryAuthRepository::new();
        repo.create(&user("a@x.com", Duration::hours(24))).await.unwrap();

        let err = repo
            .create(&user("a@x.com", Duration::hours(24)))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_replace_refresh_token_is_compare_and_set() {
        let repo = InMemoryAuthRepository::new();
        let mut u = user("a@x.com", Duration::hours(24));
        u.set_refresh_token(Some("old".to_string()));
        repo.create(&u).await.unwrap();

        assert!(repo.replace_refresh_token(&u.user_id, "old", Some("new")).await.unwrap());
        // Second caller presenting the same value loses
        assert!(!repo.replace_refresh_token(&u.user_id, "old", Some("newer")).await.unwrap());

        let stored = repo.find_by_id(&u.user_id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token_digest.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_cleanup_expired_tokens() {
        let repo = InMemoryAuthRepository::new();
        let expired = user("old@x.com", Duration::hours(-1));
        let live = user("new@x.com", Duration::hours(24));
        repo.create(&expired).await.unwrap();
        repo.create(&live).await.unwrap();

        assert_eq!(repo.cleanup_expired_tokens().await.unwrap(), 1);
        assert!(repo.find_by_id(&expired.user_id).await.unwrap().unwrap().verification.is_none());
        assert!(repo.find_by_id(&live.user_id).await.unwrap().unwrap().verification.is_some());
    }
}
