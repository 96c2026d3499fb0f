pub mod webhook_handler;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::app_state::AppState;
use webhook_handler::webhook_handler;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/", get(|| async { "commit-relay is running" }))
        .with_state(state)
}
