use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, server, types::PkceToken};

/// Runs the HTTP server in the foreground until it fails or is interrupted.
pub async fn serve(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    if let Err(e) = server::start_api_server(shared_state).await {
        error!("Server stopped: {}", e);
    }
}
