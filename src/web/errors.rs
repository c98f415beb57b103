use actix_web::{ResponseError, error::BlockingError, web::HttpResponse, http::StatusCode};
use derive_more::Display;
use diesel::result::{DatabaseErrorKind, Error as DBError};
use log::error;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ServiceError {
    #[display(fmt = "Internal Server Error: {}", _0)]
    InternalServerError(String),

    #[display(fmt = "Connection Error: {}", _0)]
    ConnectionError(String),

    #[display(fmt = "Validation Error: {}", _0)]
    ValidationError(String),

    #[display(fmt = "{} Not Found", _0)]
    NotFound(String),

    #[display(fmt = "Permission Denied: {}", _0)]
    PermissionDenied(String),

    #[display(fmt = "Write Failed: {}", _0)]
    WriteFailed(String),
}

impl ServiceError {
    fn detail(&self) -> String {
        match self {
            ServiceError::InternalServerError(_) | ServiceError::ConnectionError(_) => "Internal Server Error".to_string(),
            ServiceError::WriteFailed(_) => "Cannot store record".to_string(),
            ServiceError::ValidationError(x) => x.clone(),
            ServiceError::NotFound(x) => format!("{} Not Found", x),
            ServiceError::PermissionDenied(x) => x.clone(),
        }
    }
}

impl From<DBError> for ServiceError {
    fn from(error: DBError) -> ServiceError {
        match error {
            DBError::NotFound => ServiceError::NotFound("Record".to_string()),
            DBError::DatabaseError(kind, info) => {
                let message = info.details().unwrap_or_else(|| info.message()).to_string();
                if let DatabaseErrorKind::UniqueViolation = kind {
                    ServiceError::WriteFailed(message)
                } else {
                    ServiceError::InternalServerError(format!("DB error, {:?} {}", kind, info.message()))
                }
            }
            err => ServiceError::InternalServerError(format!("DB error, {}", err)),
        }
    }
}

impl From<r2d2::Error> for ServiceError {
    fn from(error: r2d2::Error) -> ServiceError {
        ServiceError::ConnectionError(format!("Pool error: {}", error))
    }
}

impl From<BlockingError<ServiceError>> for ServiceError {
    fn from(error: BlockingError<ServiceError>) -> ServiceError {
        match error {
            BlockingError::Error(x) => x,
            BlockingError::Canceled => ServiceError::InternalServerError("Blocking operation canceled".to_string()),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::ConnectionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::WriteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        }
        HttpResponse::build(status).json(json!({ "detail": self.detail() }))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
