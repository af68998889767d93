use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entry", post(handlers::save_entry_form))
        .route("/api/today", get(handlers::get_today))
        .route("/api/entries", get(handlers::list_entries).post(handlers::save_entry))
        .route("/api/heatmap", get(handlers::get_heatmap))
        .route("/api/session/reset", post(handlers::reset_session))
        .with_state(state)
}
