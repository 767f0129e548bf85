//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, one_time_token::OneTimeToken, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    password_hash,
    email_verified,
    verification_token,
    verification_expires_at,
    refresh_token,
    reset_password_token,
    reset_password_expires_at,
    last_login_at,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let (verification_token, verification_expires_at) = split_token(&user.verification);
        let (reset_token, reset_expires_at) = split_token(&user.password_reset);

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                email_verified,
                verification_token,
                verification_expires_at,
                refresh_token,
                reset_password_token,
                reset_password_expires_at,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.email_verified)
        .bind(verification_token)
        .bind(verification_expires_at)
        .bind(user.refresh_token_digest.as_deref())
        .bind(reset_token)
        .bind(reset_expires_at)
        .bind(user.last_login_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailTaken,
            _ => AuthError::Database(e),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.find_one("email", email.as_str()).await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_verification_token(&self, digest: &str) -> AuthResult<Option<User>> {
        self.find_one("verification_token", digest).await
    }

    async fn find_by_reset_token(&self, digest: &str) -> AuthResult<Option<User>> {
        self.find_one("reset_password_token", digest).await
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let (verification_token, verification_expires_at) = split_token(&user.verification);
        let (reset_token, reset_expires_at) = split_token(&user.password_reset);

        sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                password_hash = $3,
                email_verified = $4,
                verification_token = $5,
                verification_expires_at = $6,
                refresh_token = $7,
                reset_password_token = $8,
                reset_password_expires_at = $9,
                last_login_at = $10,
                updated_at = $11
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.email_verified)
        .bind(verification_token)
        .bind(verification_expires_at)
        .bind(user.refresh_token_digest.as_deref())
        .bind(reset_token)
        .bind(reset_expires_at)
        .bind(user.last_login_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn replace_refresh_token(
        &self,
        user_id: &UserId,
        expected: &str,
        new: Option<&str>,
    ) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $3, updated_at = NOW()
            WHERE user_id = $1 AND refresh_token = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(expected)
        .bind(new)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }

    async fn cleanup_expired_tokens(&self) -> AuthResult<u64> {
        let verification = sqlx::query(
            r#"
            UPDATE users
            SET verification_token = NULL, verification_expires_at = NULL
            WHERE verification_expires_at < NOW()
            "#,
        )
        .execute(&self.pool)
        .await?
        .rows_affected();

        let reset = sqlx::query(
            r#"
            UPDATE users
            SET reset_password_token = NULL, reset_password_expires_at = NULL
            WHERE reset_password_expires_at < NOW()
            "#,
        )
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::info!(
            verification_tokens = verification,
            reset_tokens = reset,
            "Cleaned up expired account tokens"
        );

        Ok(verification + reset)
    }
}

fn split_token(token: &Option<OneTimeToken>) -> (Option<&str>, Option<DateTime<Utc>>) {
    match token {
        Some(t) => (Some(t.digest.as_str()), Some(t.expires_at)),
        None => (None, None),
    }
}

fn join_token(digest: Option<String>, expires_at: Option<DateTime<Utc>>) -> Option<OneTimeToken> {
    match (digest, expires_at) {
        (Some(digest), Some(expires_at)) => Some(OneTimeToken { digest, expires_at }),
        _ => None,
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    email_verified: bool,
    verification_token: Option<String>,
    verification_expires_at: Option<DateTime<Utc>>,
    refresh_token: Option<String>,
    reset_password_token: Option<String>,
    reset_password_expires_at: Option<DateTime<Utc>>,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            email_verified: self.email_verified,
            verification: join_token(self.verification_token, self.verification_expires_at),
            refresh_token_digest: self.refresh_token,
            password_reset: join_token(self.reset_password_token, self.reset_password_expires_at),
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
