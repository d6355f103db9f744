use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Request-level error kinds, each mapped to exactly one HTTP status.
///
/// Store-layer "no rows" conditions never reach this type directly: the
/// token lookup translates them to `Auth` and resource-by-id lookups to
/// `NotFound`. Everything else lands in `Unhandled`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error("invalid user")]
    Auth,
    #[error("invalid action")]
    Authorization,
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Unhandled(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct UnhandledBody {
    error: &'static str,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { message })).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(_) => error_response(StatusCode::BAD_REQUEST, self.to_string()),
            Error::Auth => error_response(StatusCode::UNAUTHORIZED, self.to_string()),
            Error::Authorization => error_response(StatusCode::FORBIDDEN, self.to_string()),
            Error::NotFound => error_response(StatusCode::NOT_FOUND, self.to_string()),
            Error::Unhandled(e) => {
                tracing::error!("unhandled error: {}", crate::unpack_error(e.as_ref()));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(UnhandledBody {
                        error: "unhandled error",
                    }),
                )
                    .into_response()
            }
        }
    }
}
