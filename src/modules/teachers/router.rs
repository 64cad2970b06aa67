use crate::modules::teachers::controller::{get_common_students, register_students};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_students))
        .route("/commonstudents", get(get_common_students))
}
