use axum::{
    Router,
    routing::{get, post},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/signup", post(handler::signup))
        .route("/users/login", post(handler::login))
        .route("/users/logout", post(handler::logout))
        .route("/profile", get(handler::profile))
}
