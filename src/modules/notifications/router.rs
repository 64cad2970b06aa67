use crate::modules::notifications::controller::retrieve_for_notifications;
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_notifications_router() -> Router<AppState> {
    Router::new().route("/retrievefornotifications", post(retrieve_for_notifications))
}
