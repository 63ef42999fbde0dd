use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

pub mod account;
pub mod auto_deposit;
pub mod clock;
pub mod config;
pub mod deposit;
pub mod eligibility;
pub mod scheduler;
pub mod uuid_service;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ValidationFailureItem {
    InvalidValue(Arc<str>),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] dao::DaoError),

    #[error("Entity {0} not found")]
    EntityNotFound(Uuid),

    #[error("ID cannot be set on create")]
    IdSetOnCreate,

    #[error("Version cannot be set on create")]
    VersionSetOnCreate,

    #[error("Validation error: {0:?}")]
    ValidationError(Arc<[ValidationFailureItem]>),

    #[error("Unknown time zone: {0}")]
    InvalidTimezone(Arc<str>),

    #[error("Invalid cron expression: {0}")]
    InvalidCron(Arc<str>),

    #[error("Internal error: {0}")]
    InternalError(Arc<str>),
}
