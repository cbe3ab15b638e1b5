use actix_web::{
    error::{self, JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use derive_more::Display;
use log::error;
use serde_json::json;

use crate::{blobs::BlobError, db::DbError};

/// Request-terminal failures. Every variant maps to one HTTP status and a
/// `{"detail": ...}` body.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "{} not found", _0)]
    NotFound(&'static str),

    #[display(fmt = "{} not found", _0)]
    ParentNotFound(&'static str),

    #[display(fmt = "{} already registered", _0)]
    UniquenessViolation(&'static str),

    #[display(fmt = "{}", _0)]
    BadClientData(String),

    #[display(fmt = "internal error")]
    InternalError,
}

impl std::error::Error for ApiError {}

impl error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ParentNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UniquenessViolation(_) => StatusCode::BAD_REQUEST,
            ApiError::BadClientData(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Duplicate(field) => ApiError::UniquenessViolation(field),
            other => {
                error!("storage failure: {}", other);
                ApiError::InternalError
            }
        }
    }
}

impl From<BlobError> for ApiError {
    fn from(err: BlobError) -> Self {
        error!("photo storage failure: {}", err);
        ApiError::InternalError
    }
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadClientData(err.to_string()).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadClientData(err.to_string()).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadClientData(err.to_string()).into()
}
