//! Password Reset Use Cases

use std::sync::Arc;

use chrono::Utc;
use platform::mail::{MailTransport, send_best_effort};

use crate::application::config::AuthConfig;
use crate::application::notifications::password_reset_email;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    one_time_token::OneTimeToken,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Mails a one-hour reset link
pub struct RequestPasswordResetUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    mailer: Arc<MailTransport>,
    config: Arc<AuthConfig>,
}

impl<R> RequestPasswordResetUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, mailer: Arc<MailTransport>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, email: &str) -> AuthResult<()> {
        let email = Email::new(email)?;

        let mut user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let (raw, token) = OneTimeToken::issue(self.config.reset_window());
        user.set_password_reset(token);
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password reset requested");

        send_best_effort(
            self.mailer.as_ref(),
            "password_reset",
            password_reset_email(&self.config, user.email.as_str(), &raw),
        )
        .await;

        Ok(())
    }
}

/// Consumes a reset link and sets the new password
pub struct ResetPasswordUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ResetPasswordUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, token: &str, password: String) -> AuthResult<()> {
        let mut user = self
            .repo
            .find_by_reset_token(&OneTimeToken::digest_of(token))
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        if !user.has_live_reset(Utc::now()) {
            return Err(AuthError::InvalidResetToken);
        }

        let raw_password = RawPassword::new(password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        user.change_password(password_hash);
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password reset completed");
        Ok(())
    }
}
