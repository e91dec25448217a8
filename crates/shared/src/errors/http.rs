use crate::errors::{error::ErrorResponse, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Internal(String),
    /// Extractor rejection that keeps its own status, e.g. 413 for an
    /// oversized body.
    Rejected(StatusCode, String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Rejected(status, _) => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            HttpError::BadRequest(msg)
            | HttpError::Internal(msg)
            | HttpError::Rejected(_, msg) => msg,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => HttpError::BadRequest(msg),
            ServiceError::Repo(repo_err) => HttpError::Internal(repo_err.to_string()),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: match self {
                HttpError::BadRequest(msg)
                | HttpError::Internal(msg)
                | HttpError::Rejected(_, msg) => msg,
            },
        });

        (status, body).into_response()
    }
}
