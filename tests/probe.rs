use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
    time::Duration,
};

use axum::{routing::get, Json, Router};
use serde_json::json;
use tokio::process::Command;

use devops_todo::{
    create_router,
    probe::{probe, ProbeError},
    AppState, TodoStore,
};

/// Serves `app` on an ephemeral local port and returns its address.
fn spawn_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(server);
    addr
}

async fn spawn_todo_service() -> (SocketAddr, TodoStore) {
    let store = TodoStore::in_memory().await.unwrap();
    let state = Arc::new(AppState {
        store: store.clone(),
    });
    (spawn_server(create_router(state, None)), store)
}

fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

#[tokio::test]
async fn healthy_service_passes() {
    let (addr, _) = spawn_todo_service().await;
    let report = probe(&format!("http://{}/health", addr), Duration::from_secs(3))
        .await
        .unwrap();
    assert_eq!(report.status, "healthy");
    assert_eq!(report.version.as_deref(), Some("1.0.0"));
    assert!(report.timestamp.is_some());
}

#[tokio::test]
async fn status_alone_is_enough_to_pass() {
    let app = Router::new().route("/health", get(|| async { Json(json!({"status": "healthy"})) }));
    let addr = spawn_server(app);

    let report = probe(&format!("http://{}/health", addr), Duration::from_secs(3))
        .await
        .unwrap();
    assert_eq!(report.status, "healthy");
    assert!(report.version.is_none());
    assert!(report.timestamp.is_none());
}

#[tokio::test]
async fn service_with_dead_database_fails() {
    let (addr, store) = spawn_todo_service().await;
    store.close().await;

    let err = probe(&format!("http://{}/health", addr), Duration::from_secs(3))
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::BadStatus { status, .. } if status == 503));
}

#[tokio::test]
async fn nothing_listening_is_unreachable() {
    let addr = closed_port();
    let err = probe(&format!("http://{}/health", addr), Duration::from_secs(3))
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::Unreachable { .. }));
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let app = Router::new().route(
        "/health",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    );
    let addr = spawn_server(app);

    let err = probe(&format!("http://{}/health", addr), Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::Timeout { .. }));
}

#[tokio::test]
async fn non_healthy_status_field_fails() {
    let app = Router::new().route(
        "/health",
        get(|| async {
            Json(json!({
                "status": "degraded",
                "timestamp": "2024-01-01T00:00:00+00:00",
                "version": "1.0.0"
            }))
        }),
    );
    let addr = spawn_server(app);

    let err = probe(&format!("http://{}/health", addr), Duration::from_secs(3))
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::Unhealthy { status, .. } if status == "degraded"));
}

#[tokio::test]
async fn plain_text_body_fails() {
    let app = Router::new().route("/health", get(|| async { "OK" }));
    let addr = spawn_server(app);

    let err = probe(&format!("http://{}/health", addr), Duration::from_secs(3))
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::BadBody { .. }));
}

#[tokio::test]
async fn healthcheck_command_exit_codes() {
    let bin = env!("CARGO_BIN_EXE_devops-todo");
    let (addr, _) = spawn_todo_service().await;

    let status = Command::new(bin)
        .args(["healthcheck", "--url", &format!("http://{}/health", addr)])
        .status()
        .await
        .unwrap();
    assert!(status.success());

    let status = Command::new(bin)
        .args([
            "healthcheck",
            "--url",
            &format!("http://{}/health", closed_port()),
            "--timeout",
            "1",
        ])
        .status()
        .await
        .unwrap();
    assert_eq!(status.code(), Some(1));
}
