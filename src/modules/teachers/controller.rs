use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::Query;
use tracing::instrument;

use roster_core::{AppError, ErrorResponse};

use crate::extract::JsonBody;
use crate::modules::teachers::model::{
    CommonStudentsQuery, CommonStudentsResponse, RegisterStudentsDto,
};
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterStudentsDto,
    responses(
        (status = 204, description = "Students registered to the teacher"),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Registration failed, e.g. the pair already exists", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn register_students(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<RegisterStudentsDto>,
) -> Result<StatusCode, AppError> {
    TeacherService::register_students(state.store.as_ref(), dto).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/commonstudents",
    params(CommonStudentsQuery),
    responses(
        (status = 200, description = "Students registered to every given teacher", body = CommonStudentsResponse),
        (status = 400, description = "No teacher given", body = ErrorResponse),
        (status = 404, description = "No teachers found, or some teachers not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_common_students(
    State(state): State<AppState>,
    Query(query): Query<CommonStudentsQuery>,
) -> Result<Json<CommonStudentsResponse>, AppError> {
    let teacher_emails = query.teacher_emails();
    let response = TeacherService::common_students(state.store.as_ref(), &teacher_emails).await?;

    Ok(Json(response))
}
