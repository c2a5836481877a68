use std::error::Error;
use studypact_core::errors::{StudyError, StudyResult};

#[test]
fn test_study_error_display() {
    let not_found = StudyError::NotFound("Fine not found".to_string());
    let validation = StudyError::Validation("Invalid amount".to_string());
    let authorization = StudyError::Authorization("Not a room admin".to_string());
    let database = StudyError::Database(eyre::eyre!("Database connection failed"));
    let internal = StudyError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(not_found.to_string(), "Resource not found: Fine not found");
    assert_eq!(validation.to_string(), "Validation error: Invalid amount");
    assert_eq!(
        authorization.to_string(),
        "Authorization error: Not a room admin"
    );
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let study_error = StudyError::Internal(Box::new(io_error));

    assert!(study_error.source().is_some());
}

#[test]
fn test_study_result() {
    let result: StudyResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: StudyResult<i32> = Err(StudyError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_eyre_report() {
    let report = eyre::eyre!("pool timed out");
    let study_error: StudyError = report.into();

    assert!(study_error.to_string().contains("pool timed out"));
}

#[test]
fn test_box_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let boxed_error: Box<dyn Error + Send + Sync> = Box::new(io_error);
    let study_error = StudyError::Internal(boxed_error);

    assert!(study_error.to_string().contains("IO error"));
}
