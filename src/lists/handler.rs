//! HTTP handlers for the lists API.
//!
//! Every mutation resolves the target list first (404 when absent) and then
//! checks that it belongs to the authenticated user (403 otherwise) before
//! touching the store.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use libsql::Connection;
use serde::{Deserialize, Serialize};

use super::{List, Lists};
use crate::api::StatusResponse;
use crate::auth::CurrentUser;
use crate::error::Error;
use crate::handler::AppState;
use crate::places::{Place, Places};
use crate::users::User;

#[derive(Debug, Deserialize)]
pub struct CreateList {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaceInList {
    #[serde(rename = "placeName")]
    pub place_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct ListsResponse {
    lists: Vec<List>,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    list: List,
    places: Vec<Place>,
}

#[derive(Debug, Serialize)]
struct PlacesResponse {
    places: Vec<Place>,
}

/// Fetch a list and require it to belong to `user`. Existence is checked
/// before ownership.
async fn owned_list(conn: &Connection, list_id: i64, user: &User) -> Result<List, Error> {
    let list = Lists::new(conn)
        .get(list_id)
        .await?
        .ok_or(Error::NotFound)?;

    if list.user_id != Some(user.id) {
        return Err(Error::Authorization);
    }

    Ok(list)
}

pub async fn list_lists(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Response, Error> {
    let lists = Lists::new(state.db.connection())
        .list_for_user(current.user.id, 100)
        .await?;
    Ok(Json(ListsResponse { lists }).into_response())
}

pub async fn get_list(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, Error> {
    let conn = state.db.connection();
    let lists = Lists::new(conn);
    let list = lists.get(id).await?.ok_or(Error::NotFound)?;
    let places = lists.places_for_list(id).await?;

    Ok(Json(ListResponse { list, places }).into_response())
}

pub async fn list_places_in_list(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, Error> {
    let places = Lists::new(state.db.connection())
        .places_for_user_list(current.user.id, id)
        .await?;
    Ok(Json(PlacesResponse { places }).into_response())
}

pub async fn create_list(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<CreateList>,
) -> Result<Response, Error> {
    let list = Lists::new(state.db.connection())
        .create(&payload.name, Some(current.user.id))
        .await?;
    tracing::info!("created list {} for user {}", list.id, current.user.id);
    Ok(Json(list).into_response())
}

pub async fn create_place_in_list(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CreatePlaceInList>,
) -> Result<Response, Error> {
    let conn = state.db.connection();
    let list = owned_list(conn, id, &current.user).await?;

    let place_name = match payload.place_name {
        Some(ref name) if !name.is_empty() => name,
        _ => return Err(Error::Authorization),
    };

    let place = Places::new(conn).find_or_create_by_name(place_name).await?;
    let place_id = place
        .id
        .as_saved()
        .ok_or_else(|| Error::Unhandled(anyhow::anyhow!("unsaved place cannot join a list")))?;
    Lists::new(conn).add_place(list.id, place_id).await?;

    Ok(Json(StatusResponse::ok()).into_response())
}

pub async fn add_place_to_list(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((id, pid)): Path<(i64, i64)>,
) -> Result<Response, Error> {
    let conn = state.db.connection();
    let list = owned_list(conn, id, &current.user).await?;

    let place = Places::new(conn).get(pid).await?.ok_or(Error::NotFound)?;
    let place_id = place
        .id
        .as_saved()
        .ok_or_else(|| Error::Unhandled(anyhow::anyhow!("unsaved place cannot join a list")))?;
    Lists::new(conn).add_place(list.id, place_id).await?;

    Ok(Json(StatusResponse::ok()).into_response())
}

pub async fn delete_list(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, Error> {
    let list = owned_list(state.db.connection(), id, &current.user).await?;
    state.db.delete_list(list.id).await?;

    Ok(Json(StatusResponse::ok()).into_response())
}

pub async fn remove_place_from_list(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((id, pid)): Path<(i64, i64)>,
) -> Result<Response, Error> {
    let conn = state.db.connection();
    let list = owned_list(conn, id, &current.user).await?;

    let place = Places::new(conn).get(pid).await?.ok_or(Error::NotFound)?;
    let place_id = place
        .id
        .as_saved()
        .ok_or_else(|| Error::Unhandled(anyhow::anyhow!("unsaved place cannot leave a list")))?;
    Lists::new(conn).remove_place(list.id, place_id).await?;

    Ok(Json(StatusResponse::ok()).into_response())
}
