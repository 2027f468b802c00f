use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::AuthError;

pub mod check_token;
pub mod login;
pub mod logout;
pub mod register;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiSuccess<T: Serialize + PartialEq> {
    status: StatusCode,
    body: ApiResponseBody<T>,
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status,
            body: ApiResponseBody::new(status, data),
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Failure rendered into the same `{status_code, data}` envelope, with a
/// `{message}` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// Logs the cause and hides it from the caller.
    pub fn internal(cause: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponseBody::new(
            self.status,
            ApiErrorData {
                message: self.message,
            },
        );
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail(_)
            | AuthError::InvalidCredential(_)
            | AuthError::InvalidToken(_) => ApiError::unprocessable(err.to_string()),
            AuthError::EmailAlreadyExists(_) => ApiError::new(StatusCode::CONFLICT, err.to_string()),
            AuthError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            AuthError::NotAuthenticated(_) => ApiError::unauthorized("Not authenticated"),
            AuthError::IdentityNotFound(_)
            | AuthError::Password(_)
            | AuthError::Token(_)
            | AuthError::DatabaseError(_)
            | AuthError::Unknown(_) => ApiError::internal(&err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
