//! Log-only mail gateway.
//!
//! Used when SMTP is not configured: the message is rendered exactly as it
//! would be sent and written to the log instead.

use async_trait::async_trait;
use event_notifier_core::message::{MailParams, MAIL_MODULE};

use crate::gateway::{render, MailError, MailGateway};

/// Writes rendered notifications to the log instead of delivering them.
#[derive(Debug, Default)]
pub struct LogMailGateway;

impl LogMailGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailGateway for LogMailGateway {
    async fn send(
        &self,
        key: &str,
        to: &str,
        langcode: &str,
        params: &MailParams,
    ) -> Result<(), MailError> {
        let message = render(key, params)?;
        tracing::info!(
            module = MAIL_MODULE,
            to,
            key,
            langcode,
            subject = %message.subject,
            body = %message.body_text(),
            "SMTP not configured, logging notification email"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use event_notifier_core::message::{NotificationAction, MAIL_KEY_EVENT_NOTIFICATION};
    use event_notifier_core::EventRecord;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn logs_module_and_subject() {
        let logs = Captured::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let params = MailParams::for_record(NotificationAction::Created, &EventRecord::new("Fair"));
        LogMailGateway::new()
            .send(MAIL_KEY_EVENT_NOTIFICATION, "a@site.org", "en", &params)
            .await
            .unwrap();

        let out = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("module=\"event_notifier\""));
        assert!(out.contains("Event Created: Fair"));
    }

    #[tokio::test]
    async fn known_key_succeeds() {
        let params = MailParams::for_record(NotificationAction::Created, &EventRecord::new("Fair"));
        let result = LogMailGateway::new()
            .send(MAIL_KEY_EVENT_NOTIFICATION, "a@site.org", "en", &params)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn unknown_key_fails() {
        let params = MailParams::for_record(NotificationAction::Created, &EventRecord::new("Fair"));
        let result = LogMailGateway::new()
            .send("other", "a@site.org", "en", &params)
            .await;
        assert!(result.is_err());
    }
}
