use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    ServiceUnavailable(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::EmptyCart => HttpError::BadRequest("Cart is empty".into()),

            ServiceError::Unauthorized(msg) => HttpError::Unauthorized(msg),

            ServiceError::Forbidden(msg) => HttpError::Forbidden(msg),

            ServiceError::OrderNotFound => HttpError::NotFound("Order not found".into()),

            ServiceError::NotFound(what) => HttpError::NotFound(format!("{what} not found")),

            ServiceError::InvalidSignature => {
                HttpError::BadRequest("Invalid payment signature".into())
            }

            err @ (ServiceError::IllegalTransition { .. }
            | ServiceError::InsufficientStock { .. }
            | ServiceError::CodUnavailable(_)) => HttpError::BadRequest(err.to_string()),

            ServiceError::Validation(errors) => {
                HttpError::BadRequest(format!("Validation failed: {}", errors.join("; ")))
            }

            ServiceError::ConcurrentUpdate => {
                HttpError::Conflict("Order was modified concurrently, please retry".into())
            }

            ServiceError::GatewayUnavailable(msg) => HttpError::ServiceUnavailable(msg),

            ServiceError::Jwt(_) => HttpError::Unauthorized("Invalid token".into()),

            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".into()),

            ServiceError::InvalidTokenType => HttpError::Unauthorized("Invalid token type".into()),

            ServiceError::Repo(RepositoryError::NotFound) => HttpError::NotFound("Not found".into()),

            ServiceError::Repo(RepositoryError::Conflict(msg)) => HttpError::Conflict(msg),

            ServiceError::Repo(RepositoryError::AlreadyExists) => {
                HttpError::Conflict("Resource already exists".into())
            }

            ServiceError::Repo(repo_err) => {
                error!("❌ Repository failure surfaced to HTTP: {repo_err:?}");
                HttpError::Internal("Internal server error".into())
            }

            ServiceError::Internal(msg) => {
                error!("❌ Internal failure surfaced to HTTP: {msg}");
                HttpError::Internal("Internal server error".into())
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            HttpError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServiceError) -> StatusCode {
        HttpError::from(err).into_response().status()
    }

    #[test]
    fn validation_class_errors_are_bad_requests() {
        assert_eq!(status_of(ServiceError::EmptyCart), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(ServiceError::InvalidSignature),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ServiceError::IllegalTransition {
                from: "delivered".into(),
                to: "pending".into(),
            }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn lookup_and_gateway_errors_keep_their_codes() {
        assert_eq!(status_of(ServiceError::OrderNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ServiceError::GatewayUnavailable("down".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(ServiceError::ConcurrentUpdate),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ServiceError::Forbidden("admin only".into())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn unique_violations_answer_with_a_fixed_message() {
        let err = ServiceError::Repo(RepositoryError::AlreadyExists);
        match HttpError::from(err) {
            HttpError::Conflict(msg) => assert_eq!(msg, "Resource already exists"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn persistence_errors_hide_their_detail() {
        let err = ServiceError::Repo(RepositoryError::Custom("relation missing".into()));
        match HttpError::from(err) {
            HttpError::Internal(msg) => assert_eq!(msg, "Internal server error"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
