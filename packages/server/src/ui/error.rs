//! API error type and the mapping from usecase errors to HTTP responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    domain::{RepositoryError, ValueObjectError},
    usecase::{
        HeartbeatError, ListMessagesError, ListParticipantsError, RegisterParticipantError,
        SendMessageError,
    },
};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code,
                message: message.into(),
            },
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(error: ValueObjectError) -> Self {
        ApiError::unprocessable(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::unprocessable(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::unprocessable(rejection.body_text())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        tracing::error!("Store failure: {}", error);
        ApiError::internal_server_error(error.to_string())
    }
}

impl From<RegisterParticipantError> for ApiError {
    fn from(error: RegisterParticipantError) -> Self {
        match error {
            RegisterParticipantError::Conflict(_) => ApiError::conflict(error.to_string()),
            RegisterParticipantError::Store(e) => e.into(),
        }
    }
}

impl From<ListParticipantsError> for ApiError {
    fn from(error: ListParticipantsError) -> Self {
        match error {
            ListParticipantsError::Store(e) => e.into(),
        }
    }
}

impl From<HeartbeatError> for ApiError {
    fn from(error: HeartbeatError) -> Self {
        match error {
            HeartbeatError::NotFound(_) => ApiError::not_found(error.to_string()),
            HeartbeatError::Store(e) => e.into(),
        }
    }
}

impl From<SendMessageError> for ApiError {
    fn from(error: SendMessageError) -> Self {
        match error {
            SendMessageError::Validation(e) => e.into(),
            SendMessageError::SenderNotFound(_) => ApiError::unprocessable(error.to_string()),
            SendMessageError::Store(e) => e.into(),
        }
    }
}

impl From<ListMessagesError> for ApiError {
    fn from(error: ListMessagesError) -> Self {
        match error {
            ListMessagesError::Store(e) => e.into(),
        }
    }
}
