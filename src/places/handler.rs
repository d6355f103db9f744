//! HTTP handlers for the places API.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::{Place, PlaceDetails, Places};
use crate::api::StatusResponse;
use crate::auth::CurrentUser;
use crate::commentary::{Commentaries, CommentaryView};
use crate::error::Error;
use crate::handler::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePlace {
    pub name: String,
}

#[derive(Debug, Serialize)]
struct PlacesResponse {
    places: Vec<Place>,
}

#[derive(Debug, Serialize)]
struct PlaceDetailsResponse {
    commentary: Option<CommentaryView>,
    details: PlaceDetails,
}

pub async fn list_places(State(state): State<AppState>) -> Result<Response, Error> {
    let places = Places::new(state.db.connection()).list(100).await?;
    Ok(Json(PlacesResponse { places }).into_response())
}

pub async fn get_place(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, Error> {
    let conn = state.db.connection();
    let place = Places::new(conn).get(id).await?.ok_or(Error::NotFound)?;
    let commentary = Commentaries::new(conn)
        .find_for_user_and_place(current.user.id, id)
        .await?;

    Ok(Json(PlaceDetailsResponse {
        commentary: commentary.map(CommentaryView::from),
        details: place.into(),
    })
    .into_response())
}

pub async fn create_place(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(payload): Json<CreatePlace>,
) -> Result<Response, Error> {
    let place = Places::new(state.db.connection())
        .create(&payload.name)
        .await?;
    tracing::info!("created place {:?}", place.id);
    Ok(Json(place).into_response())
}

pub async fn delete_place(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, Error> {
    Places::new(state.db.connection())
        .get(id)
        .await?
        .ok_or(Error::NotFound)?;
    state.db.delete_place(id).await?;
    Ok(Json(StatusResponse::ok()).into_response())
}
