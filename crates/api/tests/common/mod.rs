#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use event_notifier_core::{InMemoryConfigStore, NotificationSettings};
use event_notifier_events::{NotificationDispatcher, RecordingMailGateway};
use http_body_util::BodyExt;
use tower::ServiceExt;

use event_notifier_api::config::ServerConfig;
use event_notifier_api::router::build_app_router;
use event_notifier_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        mail_langcode: "en".to_string(),
    }
}

/// The application under test plus handles on its in-memory collaborators.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryConfigStore>,
    pub gateway: Arc<RecordingMailGateway>,
}

/// Build the full application router over in-memory settings and a
/// recording mail gateway.
pub fn build_test_app(settings: Option<NotificationSettings>) -> TestApp {
    let store = Arc::new(match settings {
        Some(s) => InMemoryConfigStore::with_settings(s),
        None => InMemoryConfigStore::new(),
    });
    let gateway = Arc::new(RecordingMailGateway::new());
    let dispatcher = NotificationDispatcher::new(store.clone(), gateway.clone());

    let state = AppState {
        config: Arc::new(test_config()),
        config_store: store.clone(),
        dispatcher: Arc::new(dispatcher),
    };

    TestApp {
        router: build_app_router(state),
        store,
        gateway,
    }
}

/// Issue a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a request with a JSON body.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
