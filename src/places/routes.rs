use axum::{
    Router,
    routing::{delete, get, post},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/places", get(handler::list_places))
        .route("/places", post(handler::create_place))
        .route("/places/:id", get(handler::get_place))
        .route("/places/:id", delete(handler::delete_place))
}
