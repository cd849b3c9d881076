//! End-to-end tests: run the `ainiwatch` binary against an in-process axum
//! stand-in for the dashboard backend.
//!
//! The binary blocks the test thread, so every test uses the multi-threaded
//! runtime to keep the stub serving on a worker.

use std::sync::{Arc, Mutex};

use assert_cmd::Command;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use predicates::prelude::*;
use serde_json::{Value, json};

/// What the stub backend knows: the status output and the requests it served.
#[derive(Default)]
struct Backend {
    output: String,
    reject_actions: bool,
    calls: Vec<String>,
}

type Shared = Arc<Mutex<Backend>>;

async fn status(State(backend): State<Shared>) -> Json<Value> {
    let mut backend = backend.lock().unwrap();
    backend.calls.push("GET status".to_string());
    Json(json!({
        "success": true,
        "output": backend.output,
        "services": {"consul": true, "s3": false}
    }))
}

async fn action(
    State(backend): State<Shared>,
    Path((action, server)): Path<(String, String)>,
) -> Json<Value> {
    let mut backend = backend.lock().unwrap();
    backend.calls.push(format!("POST {action} {server}"));
    if backend.reject_actions {
        return Json(json!({"success": false}));
    }
    if action == "start" {
        backend.output.push_str(&format!("{server}-server  running\n"));
    }
    Json(json!({"success": true, "output": format!("{server} {action}ed")}))
}

async fn settings() -> Json<Value> {
    Json(json!({
        "success": true,
        "settings": {
            "env": {"S3_BUCKET": "backups", "HCLOUD_TOKEN": "hc-secret-42"},
            "services": {"consul": {"connected": true, "url": "http://localhost:8500"}}
        }
    }))
}

fn router(backend: &Shared) -> Router {
    Router::new()
        .route("/api/status", get(status))
        .route("/api/settings", get(settings))
        .route("/api/{action}/{server}", post(action))
        .with_state(Arc::clone(backend))
}

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port should bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn ainiwatch(base_url: &str, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ainiwatch"));
    cmd.env_remove("RUST_LOG")
        .env_remove("AINI_API_URL")
        .env("AINI_LOG", "warn")
        .arg("--url")
        .arg(base_url)
        .args(args);
    cmd
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_print_derived_status() {
    let backend = Shared::default();
    backend.lock().unwrap().output = "gpu-server  running  10.0.0.7\n".to_string();
    let base = serve(router(&backend)).await;

    ainiwatch(&base, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("APP Server   stopped  Not running"))
        .stdout(predicate::str::contains("GPU Server   running  Connected"))
        .stdout(predicate::str::contains("Consul       Connected"))
        .stdout(predicate::str::contains("S3 Storage   Not Configured"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_fail_status_with_backend_detail() {
    let router = Router::new().route(
        "/api/status",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "aini: command not found"})),
            )
        }),
    );
    let base = serve(router).await;

    ainiwatch(&base, &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("aini: command not found"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_fail_status_when_backend_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    ainiwatch(&format!("http://{addr}"), &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("request failed"));
}

// ---------------------------------------------------------------------------
// start / stop
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_print_resynchronized_state_after_start() {
    let backend = Shared::default();
    let base = serve(router(&backend)).await;

    ainiwatch(&base, &["start", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("APP Server   running  Connected"))
        .stdout(predicate::str::contains("Error").not());

    assert_eq!(
        backend.lock().unwrap().calls,
        ["POST start app", "GET status"]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_keep_state_and_fail_when_action_rejected() {
    let backend = Shared::default();
    backend.lock().unwrap().reject_actions = true;
    let base = serve(router(&backend)).await;

    ainiwatch(&base, &["start", "gpu"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("GPU Server   stopped  Not running"))
        .stdout(predicate::str::contains(
            "Error: failed to start gpu server: /api/start/gpu reported failure",
        ));

    assert_eq!(backend.lock().unwrap().calls, ["POST start gpu"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_reject_unknown_server_without_calling_backend() {
    let backend = Shared::default();
    let base = serve(router(&backend)).await;

    ainiwatch(&base, &["stop", "db"]).assert().failure();

    assert!(backend.lock().unwrap().calls.is_empty());
}

// ---------------------------------------------------------------------------
// settings
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_mask_secret_settings_by_default() {
    let backend = Shared::default();
    let base = serve(router(&backend)).await;

    ainiwatch(&base, &["settings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backups"))
        .stdout(predicate::str::contains("http://consul:8500"))
        .stdout(predicate::str::contains("hc-secret-42").not());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_reveal_secret_settings_on_request() {
    let backend = Shared::default();
    let base = serve(router(&backend)).await;

    ainiwatch(&base, &["settings", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hc-secret-42"));
}
