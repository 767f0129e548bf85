//! Sign Up Use Case
//!
//! Creates a new unverified account, logs it in, and mails the
//! verification link.

use std::sync::Arc;

use platform::crypto::token_digest;
use platform::mail::{MailTransport, send_best_effort};

use crate::application::config::AuthConfig;
use crate::application::notifications::verification_email;
use crate::application::token::{TokenPair, TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    one_time_token::OneTimeToken,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

pub struct SignUpOutput {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    mailer: Arc<MailTransport>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(
        repo: Arc<R>,
        tokens: Arc<TokenService>,
        mailer: Arc<MailTransport>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            tokens,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let (verification_token, verification) =
            OneTimeToken::issue(self.config.verification_window());

        let mut user = User::new(email, password_hash, verification);
        let tokens = self.tokens.issue_token_pair(&user.user_id)?;
        user.set_refresh_token(Some(token_digest(&tokens.refresh_token)));

        // Unique index still decides when two signups race
        self.repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        send_best_effort(
            self.mailer.as_ref(),
            "verification",
            verification_email(&self.config, user.email.as_str(), &verification_token),
        )
        .await;

        Ok(SignUpOutput { user, tokens })
    }
}
