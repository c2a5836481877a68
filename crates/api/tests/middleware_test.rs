use axum::http::StatusCode;
use studypact_api::middleware::error_handling::{AppError, map_error};
use studypact_core::errors::StudyError;

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = StudyError::NotFound("Fine not found".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = StudyError::Validation("Invalid input".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_authorization() {
    let error = StudyError::Authorization("Not authorized".to_string());

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_database() {
    let error = StudyError::Database(eyre::eyre!("Database error"));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = StudyError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_eyre_reports_map_to_database_errors() {
    let error: AppError = eyre::eyre!("connection refused").into();

    assert!(matches!(error.0, StudyError::Database(_)));
}
