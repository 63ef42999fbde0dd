use service::ValidationFailureItem;
use time::{Date, Month, PrimitiveDateTime, Time};
use uuid::Uuid;

pub fn test_not_found<T>(result: &Result<T, service::ServiceError>, target_id: &Uuid) {
    if let Err(service::ServiceError::EntityNotFound(id)) = result {
        assert_eq!(
            id, target_id,
            "Expected entity {} not found but got {}",
            target_id, id
        );
    } else {
        panic!("Expected entity {} not found error", target_id);
    }
}

pub fn test_zero_id_error<T>(result: &Result<T, service::ServiceError>) {
    if let Err(service::ServiceError::IdSetOnCreate) = result {
    } else {
        panic!("Expected id set on create error");
    }
}

pub fn test_zero_version_error<T>(result: &Result<T, service::ServiceError>) {
    if let Err(service::ServiceError::VersionSetOnCreate) = result {
    } else {
        panic!("Expected version set on create error");
    }
}

pub fn test_database_error<T>(result: &Result<T, service::ServiceError>) {
    if let Err(service::ServiceError::DatabaseQueryError(_)) = result {
    } else {
        panic!("Expected a data access error");
    }
}

pub fn test_validation_error<T>(
    result: &Result<T, service::ServiceError>,
    validation_failure: &ValidationFailureItem,
    fail_count: usize,
) {
    if let Err(service::ServiceError::ValidationError(validation_failure_items)) = result {
        if !validation_failure_items.contains(validation_failure) {
            panic!(
                "Validation failure not found: {:?} in {:?}",
                validation_failure, validation_failure_items
            );
        }
        assert_eq!(fail_count, validation_failure_items.len());
    } else {
        panic!("Expected validation error");
    }
}

pub fn generate_default_datetime() -> PrimitiveDateTime {
    PrimitiveDateTime::new(
        Date::from_calendar_date(2024, Month::June, 10).unwrap(),
        Time::from_hms(6, 0, 0).unwrap(),
    )
}

pub fn db_error() -> dao::DaoError {
    dao::DaoError::DatabaseQueryError("Simulated DB error".into())
}
