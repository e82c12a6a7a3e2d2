use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{Res, api, config, info, types::PkceToken};

pub fn router(state: Arc<Mutex<Option<PkceToken>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
        .route("/api/profile", get(api::profile))
        .route("/api/search", get(api::search))
        .route("/api/artists/top", get(api::top_artists))
        .route("/api/artists/top-tracks", post(api::top_tracks))
        .route("/api/playlists", get(api::list_playlists))
        .route("/api/playlists/generate", post(api::generate_playlist))
        .route("/api/playlists/manage", post(api::manage_playlist))
}

pub async fn start_api_server(state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
