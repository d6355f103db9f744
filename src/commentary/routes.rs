use axum::{Router, routing::post};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/places/:id/commentary",
        post(handler::create_commentary),
    )
}
