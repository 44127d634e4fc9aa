//! Domain core for the event notifier.
//!
//! Everything here is host-agnostic and free of transport concerns:
//!
//! - [`content`]: the [`EventRecord`] snapshot handed to lifecycle hooks.
//! - [`settings`]: typed [`NotificationSettings`] and the recipient fallback.
//! - [`settings_form`]: the admin settings form schema, validation and submit.
//! - [`message`]: email body builder and the `event_notification` render hook.
//! - [`config_store`]: the [`ConfigStore`] port plus an in-memory store.

pub mod config_store;
pub mod content;
pub mod error;
pub mod message;
pub mod settings;
pub mod settings_form;
pub mod types;

pub use config_store::{ConfigStore, InMemoryConfigStore};
pub use content::EventRecord;
pub use error::CoreError;
pub use message::{MailParams, NotificationAction, NotificationMessage};
pub use settings::{NotificationSettings, NotificationType};
