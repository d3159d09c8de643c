mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use tomato_timer::create_router;

fn router() -> Router {
    let (state, _) = common::app_state();
    create_router(state)
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

#[tokio::test(start_paused = true)]
async fn health_reports_ok() {
    let app = router();
    let (status, body) = call(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn status_starts_at_twenty_five_minutes() {
    let app = router();
    let (status, body) = call(&app, "GET", "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["display_time"], "25:00");
    assert_eq!(body["timer"]["phase"], "session");
    assert_eq!(body["timer"]["is_paused"], true);
    assert_eq!(body["timer"]["session_length"], 25);
    assert_eq!(body["timer"]["break_length"], 5);
    assert_eq!(body["last_action"], Value::Null);
}

#[tokio::test(start_paused = true)]
async fn session_decrement_updates_display() {
    let app = router();
    let (status, body) = call(&app, "POST", "/interval/session/decrement").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["session_length"], 24);
    assert_eq!(body["timer"]["display_time"], "24:00");
    assert_eq!(body["status"], "paused");
}

#[tokio::test(start_paused = true)]
async fn break_increment_leaves_display() {
    let app = router();
    let (status, body) = call(&app, "POST", "/interval/break/increment").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["break_length"], 6);
    assert_eq!(body["timer"]["display_time"], "25:00");
}

#[tokio::test(start_paused = true)]
async fn out_of_range_adjustment_is_not_an_error() {
    let app = router();
    for _ in 0..4 {
        call(&app, "POST", "/interval/break/decrement").await;
    }
    let (status, body) = call(&app, "POST", "/interval/break/decrement").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["break_length"], 1);
}

#[tokio::test(start_paused = true)]
async fn unknown_interval_is_not_found() {
    let app = router();
    let (status, _) = call(&app, "POST", "/interval/lunch/increment").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, "POST", "/interval/session/sideways").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn start_pause_and_reset_flow() {
    let app = router();

    let (status, body) = call(&app, "POST", "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");

    let (_, body) = call(&app, "POST", "/start-stop").await;
    assert_eq!(body["status"], "paused");
    assert_eq!(body["timer"]["display_time"], "25:00");

    let (_, body) = call(&app, "POST", "/start-stop").await;
    assert_eq!(body["status"], "running");

    let (_, body) = call(&app, "POST", "/pause").await;
    assert_eq!(body["status"], "paused");

    call(&app, "POST", "/interval/session/increment").await;
    let (status, body) = call(&app, "POST", "/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["display_time"], "25:00");
    assert_eq!(body["timer"]["session_length"], 25);

    let (_, body) = call(&app, "GET", "/status").await;
    assert_eq!(body["last_action"], "reset");
}
