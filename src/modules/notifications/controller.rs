use axum::{Json, extract::State};
use tracing::instrument;

use roster_core::{AppError, ErrorResponse};

use crate::extract::JsonBody;
use crate::modules::notifications::model::{NotificationDto, NotificationRecipientsResponse};
use crate::modules::notifications::service::NotificationService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/retrievefornotifications",
    request_body = NotificationDto,
    responses(
        (status = 200, description = "Students that should receive the notification", body = NotificationRecipientsResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 404, description = "No teacher found, or mentioned students could not be looked up", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Notifications"
)]
#[instrument(skip(state))]
pub async fn retrieve_for_notifications(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<NotificationDto>,
) -> Result<Json<NotificationRecipientsResponse>, AppError> {
    let response = NotificationService::retrieve_for_notifications(state.store.as_ref(), dto).await?;

    Ok(Json(response))
}
