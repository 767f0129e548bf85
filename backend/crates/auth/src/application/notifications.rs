//! Account e-mails

use platform::mail::MailMessage;

use crate::application::config::AuthConfig;

const BRAND: &str = "Gorteken Holdings";

fn button(href: &str, label: &str) -> String {
    format!(
        r#"<div style="text-align: center; margin: 30px 0;">
  <a href="{href}" style="background-color: #3498db; color: white; padding: 12px 24px; text-decoration: none; border-radius: 5px; font-weight: bold;">{label}</a>
</div>"#
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
<h2 style="color: #2c3e50; text-align: center;">{title}</h2>
{body}
</div>"#
    )
}

pub fn verification_email(config: &AuthConfig, to: &str, token: &str) -> MailMessage {
    let link = config.verification_link(token);
    let body = format!(
        r#"<p style="color: #34495e; font-size: 16px;">Thank you for signing up. Please verify your email address by clicking the button below:</p>
{}
<p style="color: #7f8c8d; font-size: 14px;">If the button does not work, copy this link into your browser:<br><a href="{link}">{link}</a></p>
<p style="color: #7f8c8d; font-size: 14px;">This link expires in 24 hours. If you did not create an account, you can ignore this email.</p>"#,
        button(&link, "Verify Email")
    );

    MailMessage {
        to: to.to_string(),
        subject: format!("Verify Your Email - {BRAND}"),
        html: layout(&format!("Welcome to {BRAND}!"), &body),
    }
}

pub fn welcome_email(config: &AuthConfig, to: &str) -> MailMessage {
    let body = format!(
        r#"<p style="color: #34495e; font-size: 16px;">Your email has been verified. You now have full access to your {BRAND} account.</p>
{}
<p style="color: #7f8c8d; font-size: 14px;">If you have any questions, our support team is happy to help.</p>"#,
        button(&config.dashboard_link(), "Go to Dashboard")
    );

    MailMessage {
        to: to.to_string(),
        subject: format!("Welcome to {BRAND}!"),
        html: layout("Thank You for Verifying Your Email!", &body),
    }
}

pub fn password_reset_email(config: &AuthConfig, to: &str, token: &str) -> MailMessage {
    let link = config.reset_link(token);
    let body = format!(
        r#"<p style="color: #34495e; font-size: 16px;">We received a request to reset your password. Click the button below to choose a new one:</p>
{}
<p style="color: #7f8c8d; font-size: 14px;">If the button does not work, copy this link into your browser:<br><a href="{link}">{link}</a></p>
<p style="color: #7f8c8d; font-size: 14px;">This link expires in 1 hour. If you did not request a reset, you can ignore this email.</p>"#,
        button(&link, "Reset Password")
    );

    MailMessage {
        to: to.to_string(),
        subject: format!("Reset Your Password - {BRAND}"),
        html: layout("Password Reset", &body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            frontend_url: "https://site.test".to_string(),
            ..AuthConfig::development()
        }
    }

    #[test]
    fn test_verification_email_links_token() {
        let mail = verification_email(&config(), "a@x.com", "abc123");
        assert_eq!(mail.to, "a@x.com");
        assert!(mail.subject.starts_with("Verify Your Email"));
        assert!(mail.html.contains("https://site.test/verify-email/abc123"));
        assert!(mail.html.contains("24 hours"));
    }

    #[test]
    fn test_welcome_email_links_dashboard() {
        let mail = welcome_email(&config(), "a@x.com");
        assert!(mail.html.contains("https://site.test/dashboard"));
    }

    #[test]
    fn test_reset_email_links_token() {
        let mail = password_reset_email(&config(), "a@x.com", "def456");
        assert!(mail.html.contains("https://site.test/reset-password/def456"));
        assert!(mail.html.contains("1 hour"));
    }
}
