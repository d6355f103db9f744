//! HTTP handler for the nearby search endpoint.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::error::Error;
use crate::handler::AppState;
use crate::places::{Place, Places};

#[derive(Debug, Deserialize)]
pub struct NearbySearchParams {
    pub keyword_search: Option<String>,
    pub location: Option<String>,
    pub radius: Option<f64>,
}

pub async fn nearby_search(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(params): Query<NearbySearchParams>,
) -> Result<Response, Error> {
    let raw_results = state
        .google
        .nearby_search(
            params.keyword_search.as_deref(),
            params.location.as_deref(),
            params.radius,
        )
        .await?;
    let google_results = Place::from_google_places(&raw_results)?;

    // nearby_search has already insisted on the keyword.
    let keyword = params.keyword_search.unwrap_or_default();
    let stored = Places::new(state.db.connection())
        .search_by_name(&keyword, 20)
        .await?;

    let merged = Place::merge(stored, google_results);
    tracing::info!(
        "nearby search for {:?} merged to {} places",
        keyword,
        merged.len()
    );

    Ok(Json(merged).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Tokens;
    use crate::users::Users;

    #[tokio::test]
    async fn requires_keyword_and_location_before_any_lookup() {
        let state = AppState::memory().await;
        let conn = state.db.connection();

        let user = Users::new(conn).create("Whitney", "digest").await.unwrap();
        let token = Tokens::new(conn).generate_for_user(user.id).await.unwrap();
        let current = CurrentUser { user, token };

        let result = nearby_search(
            State(state.clone()),
            current.clone(),
            Query(NearbySearchParams {
                keyword_search: None,
                location: Some("45.52,-122.67".to_string()),
                radius: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation(_))));

        let result = nearby_search(
            State(state),
            current,
            Query(NearbySearchParams {
                keyword_search: Some("coffee".to_string()),
                location: None,
                radius: Some(2.0),
            }),
        )
        .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
