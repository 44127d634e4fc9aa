//! Integration tests for the settings form endpoints.

mod common;

use std::collections::BTreeSet;

use axum::http::{Method, StatusCode};
use common::{body_json, get, send_json};
use event_notifier_core::settings::NotificationType;
use event_notifier_core::ConfigStore;
use serde_json::json;

#[tokio::test]
async fn form_reports_defaults_before_first_save() {
    let app = common::build_test_app(None);
    let response = get(app.router, "/api/v1/settings").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let form = &json["data"];
    assert_eq!(form["form_id"], "event_notifier_settings");
    assert_eq!(form["fields"][0]["name"], "notification_email");
    assert_eq!(form["fields"][0]["type"], "email");
    assert_eq!(form["fields"][0]["required"], true);
    assert_eq!(form["fields"][1]["default_value"], true);
    assert_eq!(form["fields"][2]["default_value"], json!(["created", "published"]));
}

#[tokio::test]
async fn valid_submission_is_persisted() {
    let app = common::build_test_app(None);
    let response = send_json(
        app.router,
        Method::PUT,
        "/api/v1/settings",
        json!({
            "notification_email": "events@site.org",
            "enable_notifications": true,
            "notification_types": ["published", "updated"]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["notification_email"], "events@site.org");

    let stored = app.store.load().await.unwrap();
    assert_eq!(stored.notification_email, "events@site.org");
    assert_eq!(
        stored.notification_types,
        BTreeSet::from([NotificationType::Published, NotificationType::Updated])
    );
}

#[tokio::test]
async fn saved_values_show_up_in_form() {
    let app = common::build_test_app(None);
    send_json(
        app.router.clone(),
        Method::PUT,
        "/api/v1/settings",
        json!({ "notification_email": "ops@site.org" }),
    )
    .await;

    let json = body_json(get(app.router, "/api/v1/settings").await).await;
    assert_eq!(json["data"]["fields"][0]["default_value"], "ops@site.org");
    assert_eq!(json["data"]["fields"][1]["default_value"], false);
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = common::build_test_app(None);
    let response = send_json(
        app.router,
        Method::PUT,
        "/api/v1/settings",
        json!({ "notification_email": "not-an-email", "enable_notifications": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(!app.store.is_saved().await);
}

#[tokio::test]
async fn unknown_notification_type_is_rejected() {
    let app = common::build_test_app(None);
    let response = send_json(
        app.router,
        Method::PUT,
        "/api/v1/settings",
        json!({ "notification_email": "a@site.org", "notification_types": ["deleted"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
