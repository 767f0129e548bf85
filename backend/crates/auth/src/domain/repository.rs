//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; a duplicate email yields `AuthError::EmailTaken`
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Lookup by verification token digest (expiry not checked)
    async fn find_by_verification_token(&self, digest: &str) -> AuthResult<Option<User>>;

    /// Lookup by password-reset token digest (expiry not checked)
    async fn find_by_reset_token(&self, digest: &str) -> AuthResult<Option<User>>;

    /// Persist every mutable field
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Compare-and-set of the stored refresh token digest
    ///
    /// Returns `false` when the stored value no longer equals `expected`.
    async fn replace_refresh_token(
        &self,
        user_id: &UserId,
        expected: &str,
        new: Option<&str>,
    ) -> AuthResult<bool>;

    /// Drop expired verification / reset tokens; returns affected rows
    async fn cleanup_expired_tokens(&self) -> AuthResult<u64>;
}
