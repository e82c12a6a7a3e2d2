use artistmix::api::ApiError;
use artistmix::distribution::DistributionError;
use artistmix::generator::GenerateError;
use axum::http::StatusCode;

#[test]
fn test_distribution_errors_are_bad_requests() {
    let err: ApiError = DistributionError::InvalidBudget("track count must be positive, got 0".into()).into();

    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert!(err.message.contains("track count must be positive"));
}

#[test]
fn test_generate_errors_map_to_status_codes() {
    let err: ApiError = GenerateError::NoArtists.into();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "Select at least one artist");

    let err: ApiError = GenerateError::Distribution(DistributionError::InvalidPool {
        artist_id: "A".into(),
        track_id: "t".into(),
        reason: "missing uri".into(),
    })
    .into();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);

    let err: ApiError = GenerateError::Fetch("connection reset".into()).into();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, "Failed to fetch artist tracks");

    let err: ApiError = GenerateError::Playlist("403 Forbidden".into()).into();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_unauthorized_error() {
    let err = ApiError::unauthorized("Failed to load token");
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
}
