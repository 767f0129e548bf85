//! Email Verification Use Cases

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use platform::mail::{MailTransport, send_best_effort};

use crate::application::config::AuthConfig;
use crate::application::notifications::{verification_email, welcome_email};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::one_time_token::OneTimeToken;
use crate::error::{AuthError, AuthResult};

/// Consumes a verification link
pub struct VerifyEmailUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    mailer: Arc<MailTransport>,
    config: Arc<AuthConfig>,
}

impl<R> VerifyEmailUseCase<R>
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

    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        let mut user = self
            .repo
            .find_by_verification_token(&OneTimeToken::digest_of(token))
            .await?
            .ok_or(AuthError::InvalidVerificationToken)?;

        if !user.has_live_verification(Utc::now()) {
            return Err(AuthError::InvalidVerificationToken);
        }

        user.mark_email_verified();
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Email verified");

        send_best_effort(
            self.mailer.as_ref(),
            "welcome",
            welcome_email(&self.config, user.email.as_str()),
        )
        .await;

        Ok(())
    }
}

/// Issues a fresh verification link for the signed-in user
pub struct ResendVerificationUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    mailer: Arc<MailTransport>,
    config: Arc<AuthConfig>,
}

impl<R> ResendVerificationUseCase<R>
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

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<()> {
        let mut user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.email_verified {
            return Err(AuthError::AlreadyVerified);
        }

        let (raw, token) = OneTimeToken::issue(self.config.verification_window());
        user.set_verification(token);
        self.repo.update(&user).await?;

        send_best_effort(
            self.mailer.as_ref(),
            "verification",
            verification_email(&self.config, user.email.as_str(), &raw),
        )
        .await;

        Ok(())
    }
}
