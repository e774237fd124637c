//! Stub HTTP server for oracle and chat tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    routing::post,
};
use serde_json::Value;

/// A request the stub received: path and JSON body, if any.
pub type Seen = Arc<Mutex<Vec<(String, Option<Value>)>>>;

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: &'static str,
    seen: Seen,
}

async fn handle(State(stub): State<Stub>, uri: Uri, body: String) -> (StatusCode, String) {
    stub.seen
        .lock()
        .unwrap()
        .push((uri.path().to_string(), serde_json::from_str(&body).ok()));
    (stub.status, stub.body.to_string())
}

/// Serves `body` with `status` on every endpoint. Returns the base URL and
/// the log of received requests.
pub async fn serve(status: StatusCode, body: &'static str) -> (String, Seen) {
    let seen = Seen::default();
    let stub = Stub {
        status,
        body,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/api/move", post(handle))
        .route("/api/reset", post(handle))
        .route("/chat", post(handle))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), seen)
}

/// A base URL nothing listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
