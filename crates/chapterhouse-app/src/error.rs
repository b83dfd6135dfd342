use chapterhouse_core::error::CoreError;
use chapterhouse_db::error::DbError;
use chapterhouse_service::error::ServiceError;
use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Writer, async_trait};
use serde::Serialize;
use thiserror::Error;

use crate::config::get_config_from_depot;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::CoreError(err) => core_status(err),
            Self::DatabaseError(err) => db_status(err),
            Self::ServiceError(err) => match err {
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
                ServiceError::CoreError(err) => core_status(err),
                ServiceError::DatabaseError(err) => db_status(err),
                ServiceError::InvalidConfiguration(_) | ServiceError::DieselError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Message shown to clients. Server-side failures stay generic.
    fn public_message(&self, status: StatusCode) -> String {
        if status == StatusCode::SERVICE_UNAVAILABLE {
            "Database unavailable".to_string()
        } else if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

const fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::ValidationError(_) | CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        CoreError::ConfigError(_) | CoreError::InvariantViolation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

const fn db_status(err: &DbError) -> StatusCode {
    match err {
        DbError::PoolError(_) => StatusCode::SERVICE_UNAVAILABLE,
        DbError::CoreError(err) => core_status(err),
        DbError::DatabaseError(_) | DbError::MigrationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[async_trait]
impl Writer for AppError {
    async fn write(self, _req: &mut Request, depot: &mut Depot, res: &mut Response) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, status = %status, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        let expose = get_config_from_depot(depot)
            .is_ok_and(|settings| settings.server.expose_error_details());
        let details = (expose && status.is_server_error()).then(|| self.to_string());

        res.status_code(status);
        res.render(Json(ErrorResponse {
            error: self.public_message(status),
            details,
        }));
    }
}
