use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, info, management::TokenManager, spotify, success, types::PkceToken, warning};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    spotify::auth::auth(shared_state).await;
    info!("Next: pick artists with `artistmix search <name>` and `artistmix select add <id>`");
}

/// Forgets the cached token. The artist selection is kept.
pub async fn logout() {
    match TokenManager::delete().await {
        Ok(true) => success!("Logged out. Run `artistmix auth` to sign in again."),
        Ok(false) => warning!("Not logged in."),
        Err(e) => error!("Failed to remove cached token: {}", e),
    }
}
