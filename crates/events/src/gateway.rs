//! The outbound-mail port.

use async_trait::async_trait;
use event_notifier_core::message::{render_mail, MailParams, NotificationMessage};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for mail delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// The gateway refused the message without a transport error.
    #[error("Mail rejected: {0}")]
    Rejected(String),
}

// ---------------------------------------------------------------------------
// MailGateway
// ---------------------------------------------------------------------------

/// Sends a templated notification email.
///
/// Implementations render the message through [`render`] and own every
/// transport detail. A non-success result is reported as `Err`; callers
/// decide whether to surface it.
#[async_trait]
pub trait MailGateway: Send + Sync {
    /// Send the mail identified by template `key` to `to`.
    async fn send(
        &self,
        key: &str,
        to: &str,
        langcode: &str,
        params: &MailParams,
    ) -> Result<(), MailError>;
}

/// Run the render hook for `key`, failing if no template handled it.
pub fn render(key: &str, params: &MailParams) -> Result<NotificationMessage, MailError> {
    let mut message = NotificationMessage::default();
    render_mail(key, &mut message, params);
    if message.is_empty() {
        return Err(MailError::Build(format!("no mail template for key '{key}'")));
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use event_notifier_core::message::{NotificationAction, MAIL_KEY_EVENT_NOTIFICATION};
    use event_notifier_core::EventRecord;

    use super::*;

    #[test]
    fn render_known_key() {
        let params = MailParams::for_record(NotificationAction::Created, &EventRecord::new("Gala"));
        let message = render(MAIL_KEY_EVENT_NOTIFICATION, &params).unwrap();
        assert_eq!(message.subject, "Event Created: Gala");
    }

    #[test]
    fn render_unknown_key_fails() {
        let params = MailParams::for_record(NotificationAction::Created, &EventRecord::new("Gala"));
        assert_matches!(render("password_reset", &params), Err(MailError::Build(_)));
    }

    #[test]
    fn mail_error_display_rejected() {
        let err = MailError::Rejected("mailbox full".to_string());
        assert_eq!(err.to_string(), "Mail rejected: mailbox full");
    }
}
