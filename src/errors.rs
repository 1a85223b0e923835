use axum::{http::StatusCode, Json};
use serde::Serialize;
use thiserror::Error;

/// Request-level failures surfaced to HTTP clients.
///
/// `OutsideScope` deliberately carries no detail about the rejected path:
/// the same code and message cover escapes, unresolvable paths, and
/// nonexistent targets, so a caller cannot probe the filesystem through
/// error differences.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing required parameter: {0}")]
    MissingParam(&'static str),
    #[error("outside the allowed scope")]
    OutsideScope,
    #[error("failed to scan directory")]
    ScanFailed,
    #[error("failed to read file")]
    ReadFailed,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingParam(_) => "MissingParam",
            AppError::OutsideScope => "OutsideScope",
            AppError::ScanFailed => "ScanFailed",
            AppError::ReadFailed => "ReadFailed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParam(_) => StatusCode::BAD_REQUEST,
            AppError::OutsideScope => StatusCode::FORBIDDEN,
            AppError::ScanFailed | AppError::ReadFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

pub fn into_response(err: AppError) -> (StatusCode, Json<ErrorBody>) {
    let code = err.code();
    let message = err.to_string();
    (err.status(), Json(ErrorBody { code, message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_class() {
        assert_eq!(AppError::MissingParam("dir").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::OutsideScope.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::ScanFailed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::ReadFailed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn scope_rejection_message_is_generic() {
        // The message must not vary with the cause of the rejection.
        assert_eq!(AppError::OutsideScope.to_string(), "outside the allowed scope");
    }

    #[test]
    fn missing_param_names_the_parameter() {
        let err = AppError::MissingParam("path");
        assert_eq!(err.to_string(), "missing required parameter: path");
        assert_eq!(err.code(), "MissingParam");
    }
}
