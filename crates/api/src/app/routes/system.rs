use axum::http::StatusCode;
use axum::response::Response;

use crate::app::errors::json_error;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn unknown_endpoint() -> Response {
    json_error(StatusCode::NOT_FOUND, "unknown endpoint")
}
