//! Event notification dispatch and mail delivery.
//!
//! This crate turns content lifecycle events into notification emails:
//!
//! - [`NotificationDispatcher`]: decides, per lifecycle event, whether to
//!   notify and performs at most one send.
//! - [`MailGateway`]: the outbound-mail port the dispatcher talks to.
//! - [`delivery`]: gateway implementations (SMTP, log-only, recording).

pub mod delivery;
pub mod dispatcher;
pub mod gateway;

pub use delivery::email::{EmailConfig, SmtpMailGateway};
pub use delivery::log::LogMailGateway;
pub use delivery::recording::{RecordingMailGateway, SentMail};
pub use dispatcher::{DispatchOutcome, NotificationDispatcher, SkipReason};
pub use gateway::{MailError, MailGateway};
