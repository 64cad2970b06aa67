use std::any::Any;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::notifications::router::init_notifications_router;
use crate::modules::students::router::init_students_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, middleware, routing::get};
use roster_config::CorsConfig;
use roster_core::{AppError, INTERNAL_SERVER_ERROR};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_config);

    Router::new()
        .route("/", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .merge(init_teachers_router())
                .merge(init_students_router())
                .merge(init_notifications_router()),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

async fn health_check() -> &'static str {
    "API is running"
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route not found")
}

fn handle_panic(_: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    AppError::internal(INTERNAL_SERVER_ERROR).into_response()
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
