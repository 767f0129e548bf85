//! Sign Out Use Case
//!
//! Revokes the stored refresh token. Clearing cookies is the handler's job.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

pub struct SignOutUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> SignOutUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<()> {
        if let Some(mut user) = self.repo.find_by_id(user_id).await? {
            user.set_refresh_token(None);
            self.repo.update(&user).await?;
            tracing::info!(user_id = %user_id, "User signed out");
        }
        Ok(())
    }
}
