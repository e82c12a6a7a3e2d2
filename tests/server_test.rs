use std::sync::Arc;

use artistmix::{server, types::PkceToken};
use reqwest::StatusCode;
use serde_json::Value;
use tokio::sync::Mutex;

// Helper function to serve the full router on an ephemeral port
async fn spawn_server() -> String {
    let state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_health() {
    let base = spawn_server().await;

    let res = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["name"], "artistmix");
}

#[tokio::test]
async fn test_search_without_query_is_bad_request() {
    let base = spawn_server().await;

    let res = reqwest::get(format!("{}/api/search?q=%20", base)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid query");
}

#[tokio::test]
async fn test_generate_route_only_accepts_post() {
    let base = spawn_server().await;

    let res = reqwest::get(format!("{}/api/playlists/generate", base))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_callback_without_code() {
    let base = spawn_server().await;

    let res = reqwest::get(format!("{}/callback", base)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("Missing authorization code"));
}
