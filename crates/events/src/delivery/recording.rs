//! In-memory mail gateway that records every send.
//!
//! Intended for tests and local development. It can be switched into a
//! failing mode to exercise the delivery-failure path.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use event_notifier_core::message::{MailParams, NotificationMessage};
use tokio::sync::Mutex;

use crate::gateway::{render, MailError, MailGateway};

/// One recorded send request together with its rendered message.
#[derive(Debug, Clone)]
pub struct SentMail {
    pub key: String,
    pub to: String,
    pub langcode: String,
    pub params: MailParams,
    pub message: NotificationMessage,
}

/// Records sends instead of delivering them.
#[derive(Debug, Default)]
pub struct RecordingMailGateway {
    sent: Mutex<Vec<SentMail>>,
    failing: AtomicBool,
}

impl RecordingMailGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail (`true`) or succeed (`false`).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of every attempted send, failed ones included.
    pub async fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().await.clone()
    }

    /// Number of attempted sends.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl MailGateway for RecordingMailGateway {
    async fn send(
        &self,
        key: &str,
        to: &str,
        langcode: &str,
        params: &MailParams,
    ) -> Result<(), MailError> {
        let message = render(key, params)?;

        self.sent.lock().await.push(SentMail {
            key: key.to_string(),
            to: to.to_string(),
            langcode: langcode.to_string(),
            params: params.clone(),
            message,
        });

        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Rejected("recording gateway set to fail".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use event_notifier_core::message::{NotificationAction, MAIL_KEY_EVENT_NOTIFICATION};
    use event_notifier_core::EventRecord;

    use super::*;

    fn params() -> MailParams {
        MailParams::for_record(NotificationAction::Published, &EventRecord::new("Expo"))
    }

    #[tokio::test]
    async fn records_successful_send() {
        let gateway = RecordingMailGateway::new();

        gateway
            .send(MAIL_KEY_EVENT_NOTIFICATION, "a@site.org", "en", &params())
            .await
            .unwrap();

        let sent = gateway.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@site.org");
        assert_eq!(sent[0].message.subject, "Event Published: Expo");
    }

    #[tokio::test]
    async fn failing_mode_still_records_attempt() {
        let gateway = RecordingMailGateway::new();
        gateway.set_failing(true);

        let result = gateway
            .send(MAIL_KEY_EVENT_NOTIFICATION, "a@site.org", "en", &params())
            .await;

        assert_matches!(result, Err(MailError::Rejected(_)));
        assert_eq!(gateway.sent_count().await, 1);
    }
}
