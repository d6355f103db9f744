//! HTTP handlers for signup, login, logout and the profile view.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::{Users, hash_password, verify_password};
use crate::api::StatusResponse;
use crate::auth::{CurrentUser, TOKEN_HEADER, Tokens};
use crate::error::Error;
use crate::handler::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Response, Error> {
    let conn = state.db.connection();
    let digest = hash_password(&payload.password);
    let user = Users::new(conn).create(&payload.username, &digest).await?;
    let token = Tokens::new(conn).generate_for_user(user.id).await?;

    tracing::info!("signed up user {}", user.id);
    Ok(([(TOKEN_HEADER, token.value)], Json(user)).into_response())
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Response, Error> {
    let conn = state.db.connection();
    let user = Users::new(conn)
        .find_by_name(&payload.username)
        .await?
        .ok_or(Error::Auth)?;

    let stored = user.password_digest.as_deref().ok_or(Error::Auth)?;
    if !verify_password(&payload.password, stored) {
        return Err(Error::Auth);
    }

    let token = Tokens::new(conn).generate_for_user(user.id).await?;
    Ok(([(TOKEN_HEADER, token.value)], Json(user)).into_response())
}

pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Response, Error> {
    Tokens::new(state.db.connection())
        .delete_by_value(&current.token.value)
        .await?;

    tracing::info!("logged out user {}", current.user.id);
    Ok(Json(StatusResponse::ok()).into_response())
}

pub async fn profile(current: CurrentUser) -> Response {
    Json(current.user).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn signup_issues_a_token_and_hides_the_digest() {
        let state = AppState::memory().await;

        let response = signup(
            State(state.clone()),
            Json(Credentials {
                username: "Whitney".to_string(),
                password: "hunter2".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let header = response
            .headers()
            .get(TOKEN_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(!header.is_empty());

        let body = body_json(response).await;
        assert_eq!(body["name"], serde_json::json!("Whitney"));
        assert!(body.get("password_digest").is_none());

        // The issued token resolves back to the user.
        let token = Tokens::new(state.db.connection())
            .find_by_value(&header)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(token.user_id, body["id"].as_i64().unwrap());
    }

    #[tokio::test]
    async fn login_rejects_a_wrong_password() {
        let state = AppState::memory().await;

        signup(
            State(state.clone()),
            Json(Credentials {
                username: "Whitney".to_string(),
                password: "hunter2".to_string(),
            }),
        )
        .await
        .unwrap();

        let wrong = login(
            State(state.clone()),
            Json(Credentials {
                username: "Whitney".to_string(),
                password: "hunter3".to_string(),
            }),
        )
        .await;
        assert!(matches!(wrong, Err(Error::Auth)));

        let unknown = login(
            State(state.clone()),
            Json(Credentials {
                username: "Blair".to_string(),
                password: "hunter2".to_string(),
            }),
        )
        .await;
        assert!(matches!(unknown, Err(Error::Auth)));

        let right = login(
            State(state),
            Json(Credentials {
                username: "Whitney".to_string(),
                password: "hunter2".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(right.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn logout_deletes_the_presented_token() {
        let state = AppState::memory().await;
        let conn = state.db.connection();

        let user = Users::new(conn).create("Whitney", "digest").await.unwrap();
        let token = Tokens::new(conn).generate_for_user(user.id).await.unwrap();
        let value = token.value.clone();

        let response = logout(State(state.clone()), CurrentUser { user, token })
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert!(
            Tokens::new(state.db.connection())
                .find_by_value(&value)
                .await
                .unwrap()
                .is_none()
        );
    }
}
