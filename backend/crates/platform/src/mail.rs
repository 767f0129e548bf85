//! Outbound Mail
//!
//! Transport only: callers build the subject and HTML body. Delivery is
//! best-effort everywhere in the API, so [`send_best_effort`] logs failures
//! instead of returning them.

use std::sync::Arc;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::{ConfigError, env_opt, env_or, env_parse};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// A single HTML message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// SMTP settings
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_name: String,
}

impl MailConfig {
    /// Reads `SMTP_HOST`, `SMTP_PORT`, `EMAIL_USER`, `EMAIL_APP_PASSWORD`
    /// and `MAIL_FROM_NAME`.
    ///
    /// Returns `Ok(None)` when the credentials are absent; the caller then
    /// falls back to [`LogMailer`].
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let (Some(username), Some(password)) = (env_opt("EMAIL_USER"), env_opt("EMAIL_APP_PASSWORD"))
        else {
            return Ok(None);
        };

        Ok(Some(Self {
            host: env_or("SMTP_HOST", "smtp.gmail.com"),
            port: env_parse("SMTP_PORT", 587)?,
            username,
            password,
            from_name: env_or("MAIL_FROM_NAME", "Gorteken Holdings"),
        }))
    }
}

#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

// ============================================================================
// SMTP
// ============================================================================

/// STARTTLS relay with username/password credentials
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let address: Address = config
            .username
            .parse()
            .map_err(|_| MailError::InvalidAddress(config.username.clone()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: Mailbox::new(Some(config.from_name.clone()), address),
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(message.to.clone()))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.html)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }
}

// ============================================================================
// Development / test transports
// ============================================================================

/// Logs messages instead of sending them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body_len = message.html.len(),
            "Mail transport not configured, message logged only"
        );
        tracing::debug!(html = %message.html, "Unsent mail body");
        Ok(())
    }
}

/// Keeps every message in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryMailer {
    outbox: Arc<RwLock<Vec<MailMessage>>>,
    fail: bool,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mailer whose every send fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<MailMessage> {
        self.outbox.read().await.clone()
    }

    /// Most recent message addressed to `to`
    pub async fn last_to(&self, to: &str) -> Option<MailMessage> {
        self.outbox
            .read()
            .await
            .iter()
            .rev()
            .find(|m| m.to == to)
            .cloned()
    }
}

impl Mailer for MemoryMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Transport("connection refused".to_string()));
        }
        self.outbox.write().await.push(message);
        Ok(())
    }
}

/// Transport selected at startup
#[derive(Clone)]
pub enum MailTransport {
    Smtp(SmtpMailer),
    Log(LogMailer),
    Memory(MemoryMailer),
}

impl MailTransport {
    /// SMTP when credentials are configured, logging otherwise
    pub fn from_env() -> Result<Self, MailError> {
        match MailConfig::from_env() {
            Ok(Some(config)) => {
                tracing::info!(host = %config.host, port = config.port, "SMTP mail transport configured");
                Ok(MailTransport::Smtp(SmtpMailer::new(&config)?))
            }
            Ok(None) => {
                tracing::warn!("EMAIL_USER / EMAIL_APP_PASSWORD not set, outgoing mail will only be logged");
                Ok(MailTransport::Log(LogMailer))
            }
            Err(e) => Err(MailError::Build(e.to_string())),
        }
    }
}

impl Mailer for MailTransport {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        match self {
            MailTransport::Smtp(m) => Mailer::send(m, message).await,
            MailTransport::Log(m) => Mailer::send(m, message).await,
            MailTransport::Memory(m) => Mailer::send(m, message).await,
        }
    }
}

/// Send and log the outcome; never fails
pub async fn send_best_effort<M: Mailer>(mailer: &M, kind: &'static str, message: MailMessage) -> bool {
    let to = message.to.clone();
    match Mailer::send(mailer, message).await {
        Ok(()) => {
            tracing::info!(kind, to = %to, "Mail sent");
            true
        }
        Err(e) => {
            tracing::warn!(kind, to = %to, error = %e, "Failed to send mail");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> MailMessage {
        MailMessage {
            to: to.to_string(),
            subject: "Verify Your Email".to_string(),
            html: "<p>hi</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_mailer_records_messages() {
        let mailer = MemoryMailer::new();
        let transport = MailTransport::Memory(mailer.clone());

        assert!(send_best_effort(&transport, "verification", message("a@x.com")).await);
        assert!(send_best_effort(&transport, "verification", message("b@x.com")).await);

        assert_eq!(mailer.sent().await.len(), 2);
        assert_eq!(mailer.last_to("a@x.com").await, Some(message("a@x.com")));
        assert!(mailer.last_to("c@x.com").await.is_none());
    }

    #[tokio::test]
    async fn test_best_effort_swallows_failures() {
        let mailer = MemoryMailer::failing();
        assert!(!send_best_effort(&mailer, "welcome", message("a@x.com")).await);
        assert!(mailer.sent().await.is_empty());
    }

    #[test]
    fn test_log_mailer_never_fails() {
        let result = tokio_test::block_on(Mailer::send(&LogMailer, message("a@x.com")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_smtp_mailer_rejects_bad_sender() {
        let config = MailConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "not an address".to_string(),
            password: "pw".to_string(),
            from_name: "Gorteken Holdings".to_string(),
        };
        assert!(matches!(
            SmtpMailer::new(&config),
            Err(MailError::InvalidAddress(_))
        ));
    }
}
