use crate::{
    cli::{connect, spinner},
    error, info,
    types::ProfileSummary,
};

pub async fn profile() {
    let client = connect().await;

    let pb = spinner("Fetching profile...");
    let result = client.current_user().await;
    pb.finish_and_clear();

    let profile = match result {
        Ok(user) => ProfileSummary::from(user),
        Err(e) => error!("Failed to fetch Spotify profile: {}", e),
    };

    info!(
        "Signed in as {} ({})",
        profile.name.as_deref().unwrap_or(profile.id.as_str()),
        profile.id
    );
    if let Some(email) = &profile.email {
        println!("  email: {}", email);
    }
    if let Some(image) = &profile.image {
        println!("  image: {}", image);
    }
}
