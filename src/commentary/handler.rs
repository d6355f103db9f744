//! HTTP handler for attaching commentary to a place.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use super::{Commentaries, CreateCommentary};
use crate::auth::CurrentUser;
use crate::error::Error;
use crate::handler::AppState;
use crate::places::Places;

pub async fn create_commentary(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CreateCommentary>,
) -> Result<Response, Error> {
    let conn = state.db.connection();
    Places::new(conn).get(id).await?.ok_or(Error::NotFound)?;

    let commentary = Commentaries::new(conn)
        .create(current.user.id, id, payload)
        .await?;

    Ok(Json(commentary).into_response())
}
