use axum::Json;

use crate::{
    api::{ApiError, client},
    types::ProfileSummary,
};

pub async fn profile() -> Result<Json<ProfileSummary>, ApiError> {
    let client = client().await?;
    let profile = client
        .current_user()
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch Spotify profile", e))?;
    Ok(Json(profile.into()))
}
