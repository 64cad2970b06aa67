//! Application error type with HTTP response conversion.
//!
//! Every failure that reaches the HTTP boundary is an [`AppError`]: a kind,
//! a caller-facing message and an optional diagnostic detail. The kind alone
//! decides the status code; the detail is logged but never serialized.

use std::fmt;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message used for failures that were never given a more specific one.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input.
    Validation,
    /// A referenced teacher or student does not exist.
    NotFound,
    /// Anything unanticipated, usually a store failure.
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "No teacher found")]
    pub error: String,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn internal_with_detail<E>(message: impl Into<String>, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind: ErrorKind::Internal,
            message: message.into(),
            detail: Some(format!("{:#}", err.into())),
        }
    }

    /// Builds a validation error from the `validator` crate's report.
    pub fn from_validation(errors: ValidationErrors) -> Self {
        Self::validation(format_errors(&errors))
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// Validation and not-found failures are expected outcomes of a request.
    pub fn is_business(&self) -> bool {
        !matches!(self.kind, ErrorKind::Internal)
    }

    /// Re-labels an internal failure with an operation-specific message.
    ///
    /// Business errors pass through untouched. Internal errors are logged
    /// with `context` and keep their original text as the detail.
    pub fn rewrap(self, message: &str, context: &str) -> Self {
        if self.is_business() {
            return self;
        }

        let detail = self.detail.unwrap_or(self.message);
        tracing::error!(detail = %detail, "{}", context);

        Self {
            kind: ErrorKind::Internal,
            message: message.to_string(),
            detail: Some(detail),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({})", self.message, detail),
            None => f.write_str(&self.message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });

        (self.kind.status(), body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal_with_detail(INTERNAL_SERVER_ERROR, err)
    }
}

/// Joins every field message, in field-name order.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
