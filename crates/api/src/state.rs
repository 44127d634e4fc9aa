use std::sync::Arc;

use event_notifier_core::ConfigStore;
use event_notifier_events::NotificationDispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where notifier settings are read from and written to.
    pub config_store: Arc<dyn ConfigStore>,
    /// Lifecycle hook handler.
    pub dispatcher: Arc<NotificationDispatcher>,
}
