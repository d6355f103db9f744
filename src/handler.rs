use std::sync::Arc;

use axum::{Json, response::IntoResponse};
use serde_json::json;
use tracing::info;

use crate::db::Database;
use crate::google::GoogleClient;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub google: Arc<GoogleClient>,
}

#[cfg(test)]
impl AppState {
    pub(crate) async fn memory() -> Self {
        AppState {
            db: Arc::new(Database::memory().await.unwrap()),
            google: Arc::new(GoogleClient::new(&crate::config::Config::default())),
        }
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(json!({ "status": "ok" }))
}
