use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/event", post(handlers::update_event_form))
        .route("/api/event", get(handlers::get_event).post(handlers::update_event))
        .route("/api/countdown", get(handlers::get_countdown))
        .route("/api/countdown/stream", get(handlers::countdown_stream))
        .route("/api/quote", get(handlers::get_quote))
        .route("/api/fit", post(handlers::fit))
        .with_state(state)
}
