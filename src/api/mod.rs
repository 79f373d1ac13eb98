//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers, the per-tab WebSocket
//! endpoint and the response structures.

pub mod handlers;
pub mod responses;
pub mod ws;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;
use ws::tab_socket_handler;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/message", post(message_handler))
        .route("/timer", get(timer_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/stop", post(stop_handler))
        .route("/tabs/:tab_id/ws", get(tab_socket_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(20554, "127.0.0.1".to_string(), 120))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn start_message_has_no_reply() {
        let state = test_state();
        let response = create_router(Arc::clone(&state))
            .oneshot(post_json("/message", json!({ "action": "startTimer", "minutes": 2 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.coordinator.get_state().remaining_seconds, 120);
    }

    #[tokio::test]
    async fn state_query_replies_with_timer_state() {
        let state = test_state();
        state.coordinator.start(2).await.unwrap();

        let response = create_router(state)
            .oneshot(post_json("/message", json!({ "action": "getTimerState" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["timerState"]["isActive"], true);
        assert_eq!(body["timerState"]["totalDurationSeconds"], 120);
    }

    #[tokio::test]
    async fn unknown_message_is_not_an_error() {
        let response = create_router(test_state())
            .oneshot(post_json("/message", json!({ "action": "countWords" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn out_of_range_duration_is_a_user_error() {
        let state = test_state();
        let response = create_router(Arc::clone(&state))
            .oneshot(post_json("/timer/start", json!({ "minutes": 500 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(
            body["message"],
            "timer duration must be between 1 and 120 minutes, got 500"
        );
        assert!(!state.coordinator.get_state().is_active);
    }

    #[tokio::test]
    async fn unrepresentable_durations_are_user_errors() {
        let state = test_state();
        let app = create_router(Arc::clone(&state));

        for (minutes, shown) in [
            (json!(1e12), "1000000000000"),
            (json!(18446744073709551615u64), "18446744073709551615"),
            (json!(2.5), "2.5"),
        ] {
            let expected = format!("timer duration must be between 1 and 120 minutes, got {}", shown);

            let response = app
                .clone()
                .oneshot(post_json("/timer/start", json!({ "minutes": minutes })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_json(response).await;
            assert_eq!(body["status"], "error");
            assert_eq!(body["message"], expected);

            let response = app
                .clone()
                .oneshot(post_json(
                    "/message",
                    json!({ "action": "startTimer", "minutes": minutes }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await["message"], expected);
        }
        assert!(!state.coordinator.get_state().is_active);
    }

    #[tokio::test]
    async fn start_then_stop_over_http() {
        let state = test_state();
        let app = create_router(Arc::clone(&state));

        let response = app
            .clone()
            .oneshot(post_json("/timer/start", json!({ "minutes": 25 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "active");
        assert_eq!(body["timer"]["remainingSeconds"], 1500);

        let response = app
            .oneshot(post_json("/timer/stop", json!({})))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["status"], "inactive");
        assert_eq!(body["timer"]["isActive"], false);
        assert_eq!(state.get_last_action().0.as_deref(), Some("stopTimer"));
    }

    #[tokio::test]
    async fn status_reports_timer_and_tabs() {
        let state = test_state();
        let (_, _events) = state.tabs.register(3);
        state.tabs.focus(3);
        state.coordinator.start(1).await.unwrap();

        let response = create_router(state)
            .oneshot(Request::builder().uri("/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["remaining_display"], "01:00");
        assert_eq!(body["connected_tabs"], 1);
        assert_eq!(body["active_tab"], 3);
        assert_eq!(body["drift_seconds"], 0);
    }

    #[tokio::test]
    async fn health_check() {
        let response = create_router(test_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }
}
