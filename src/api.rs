use serde::Serialize;

/// Body returned by every mutating endpoint that has nothing better to say.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        StatusResponse { status: "OK" }
    }
}
