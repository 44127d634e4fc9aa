use std::net::SocketAddr;
use std::sync::Arc;

use event_notifier_core::{ConfigStore, InMemoryConfigStore};
use event_notifier_events::{
    EmailConfig, LogMailGateway, MailGateway, NotificationDispatcher, SmtpMailGateway,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use event_notifier_api::config::ServerConfig;
use event_notifier_api::router::build_app_router;
use event_notifier_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "event_notifier_api=debug,event_notifier_events=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Settings store ---
    let config_store: Arc<dyn ConfigStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = event_notifier_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            event_notifier_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            event_notifier_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(event_notifier_db::PgConfigStore::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, settings are kept in memory only");
            Arc::new(InMemoryConfigStore::new())
        }
    };

    // --- Mail gateway ---
    let mail_gateway: Arc<dyn MailGateway> = match EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(
                smtp_host = %email_config.smtp_host,
                smtp_port = email_config.smtp_port,
                "SMTP delivery enabled"
            );
            Arc::new(SmtpMailGateway::new(&email_config).expect("Invalid SMTP configuration"))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, notification emails will only be logged");
            Arc::new(LogMailGateway::new())
        }
    };

    // --- Dispatcher ---
    let dispatcher = NotificationDispatcher::new(Arc::clone(&config_store), mail_gateway)
        .with_langcode(config.mail_langcode.clone());

    let state = AppState {
        config: Arc::new(config.clone()),
        config_store,
        dispatcher: Arc::new(dispatcher),
    };

    let app = build_app_router(state);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
