use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use roster_core::{AppError, ErrorResponse};

use crate::extract::JsonBody;
use crate::modules::students::model::SuspendStudentDto;
use crate::modules::students::service::StudentService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/suspend",
    request_body = SuspendStudentDto,
    responses(
        (status = 204, description = "Student suspended"),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 404, description = "No student records found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn suspend_student(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<SuspendStudentDto>,
) -> Result<StatusCode, AppError> {
    StudentService::suspend_student(state.store.as_ref(), dto).await?;

    Ok(StatusCode::NO_CONTENT)
}
