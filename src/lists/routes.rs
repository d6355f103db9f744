use axum::{
    Router,
    routing::{delete, get, post},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lists", get(handler::list_lists))
        .route("/lists", post(handler::create_list))
        .route("/lists/:id", get(handler::get_list))
        .route("/lists/:id", delete(handler::delete_list))
        .route("/lists/:id/places", get(handler::list_places_in_list))
        .route("/lists/:id/places", post(handler::create_place_in_list))
        .route("/lists/:id/places/:pid", post(handler::add_place_to_list))
        .route(
            "/lists/:id/places/:pid",
            delete(handler::remove_place_from_list),
        )
}
