use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] chapterhouse_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] chapterhouse_core::error::CoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

impl ServiceError {
    pub(crate) fn not_found(kind: &str, id: uuid::Uuid) -> Self {
        Self::NotFound(format!("{kind} {id}"))
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
