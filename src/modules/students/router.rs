use crate::modules::students::controller::suspend_student;
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_students_router() -> Router<AppState> {
    Router::new().route("/suspend", post(suspend_student))
}
