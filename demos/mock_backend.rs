//! Stand-in for the currently-playing proxy the poller targets.
//!
//! Run with `cargo run --example mock_backend`, then start the poller.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

async fn currently_playing() -> Json<Value> {
    let fetched = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    Json(json!({
        "data": {
            "is_playing": true,
            "progress_ms": 42_000,
            "item": {
                "name": "Pretend Song",
                "artists": [{ "name": "Pretend Artist" }],
                "duration_ms": 215_000
            }
        },
        "fetched": fetched
    }))
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/spotify/currently-playing", get(currently_playing))
        .route("/status", get(|| async { "Backend is healthy! ✅" }));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    println!("Mock currently-playing backend listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
