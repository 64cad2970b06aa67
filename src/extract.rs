use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use roster_core::AppError;

/// JSON body extractor whose rejections are [`AppError`] validation errors.
///
/// Only the shape is checked here. Field rules (`validator`) run in the
/// services so every caller goes through them.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        Ok(JsonBody(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::validation("Missing 'Content-Type: application/json' header");
    }

    let error_msg = rejection.body_text();

    if let Some(field) = error_msg
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return AppError::validation(format!("{} is required", field));
    }

    if error_msg.contains("invalid type") {
        return AppError::validation("Invalid field type in request");
    }

    AppError::validation("Invalid request body")
}
