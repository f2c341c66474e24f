use std::any::Any;

use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;
use crate::handlers::{people, system};
use crate::middleware::rate_limit::log_request;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/people", get(people::list_people))
        .route("/api/people/{city}", get(people::list_people_by_city))
        .route("/health", get(system::health))
        .fallback(system::not_found)
        .method_not_allowed_fallback(system::method_not_allowed)
        .layer(middleware::from_fn(log_request))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn handle_panic(_: Box<dyn Any + Send + 'static>) -> Response {
    AppError::Internal("request handler panicked".to_string()).into_response()
}
