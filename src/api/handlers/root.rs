use crate::APP_USER_AGENT;
use axum::{http::StatusCode, response::IntoResponse};

// axum handler for the root banner
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, APP_USER_AGENT)
}
