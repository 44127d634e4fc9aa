//! Notification delivery via SMTP.
//!
//! [`SmtpMailGateway`] wraps the `lettre` async SMTP transport to send the
//! plain-text notification produced by the render hook. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no SMTP gateway should be
//! constructed.

use async_trait::async_trait;
use event_notifier_core::message::{MailParams, MAIL_MODULE};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::gateway::{render, MailError, MailGateway};

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@event-notifier.local";

/// Configuration for the SMTP mail gateway.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that SMTP
    /// delivery is not configured.
    ///
    /// | Variable        | Required | Default                         |
    /// |-----------------|----------|---------------------------------|
    /// | `SMTP_HOST`     | yes      | -                               |
    /// | `SMTP_PORT`     | no       | `587`                           |
    /// | `SMTP_FROM`     | no       | `noreply@event-notifier.local`  |
    /// | `SMTP_USER`     | no       | -                               |
    /// | `SMTP_PASSWORD` | no       | -                               |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// SmtpMailGateway
// ---------------------------------------------------------------------------

/// Sends rendered notification emails via SMTP.
pub struct SmtpMailGateway {
    from: Mailbox,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailGateway {
    /// Build the transport for `config`.
    ///
    /// Fails if the sender address does not parse or the relay cannot be
    /// set up for STARTTLS.
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let from: Mailbox = config.from_address.parse()?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            from,
            mailer: transport_builder.build(),
        })
    }
}

#[async_trait]
impl MailGateway for SmtpMailGateway {
    async fn send(
        &self,
        key: &str,
        to: &str,
        langcode: &str,
        params: &MailParams,
    ) -> Result<(), MailError> {
        let message = render(key, params)?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body_text())
            .map_err(|e| MailError::Build(e.to_string()))?;

        let response = self.mailer.send(email).await?;
        if !response.is_positive() {
            return Err(MailError::Rejected(response.code().to_string()));
        }

        tracing::debug!(
            module = MAIL_MODULE,
            to,
            key,
            langcode,
            "Notification email handed to SMTP relay"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config(from: &str) -> EmailConfig {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 2525,
            from_address: from.to_string(),
            smtp_user: None,
            smtp_password: None,
        }
    }

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[tokio::test]
    async fn new_rejects_bad_sender_address() {
        assert!(matches!(
            SmtpMailGateway::new(&config("not-an-email")),
            Err(MailError::Address(_))
        ));
    }

    #[tokio::test]
    async fn new_accepts_valid_config() {
        assert!(SmtpMailGateway::new(&config("noreply@site.org")).is_ok());
    }

    #[test]
    fn mail_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = MailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
