use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use super::{Token, Tokens};
use crate::error::Error;
use crate::handler::AppState;
use crate::users::{User, Users};

/// Request header carrying the session token.
pub const TOKEN_HEADER: &str = "x-glitter-token";

/// The authenticated actor, resolved from the `x-glitter-token` header
/// before any handler that names it runs. Handlers without it never see
/// the token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: Token,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let value = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let conn = state.db.connection();
        let token = Tokens::new(conn)
            .find_by_value(&value)
            .await?
            .ok_or(Error::Auth)?;
        let user = Users::new(conn)
            .get(token.user_id)
            .await?
            .ok_or(Error::Auth)?;

        Ok(CurrentUser { user, token })
    }
}
