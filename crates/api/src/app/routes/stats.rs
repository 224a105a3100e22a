use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use bloglist_core::{favorite_post, most_prolific_author, total_likes};
use bloglist_infra::DocumentStore;

use crate::app::{dto, errors::ApiError, services::AppServices};

/// `GET /api/stats`: aggregate summary over every stored blog.
pub async fn summary(Extension(services): Extension<Arc<AppServices>>) -> Result<impl IntoResponse, ApiError> {
    let blogs = services.blogs.find_all().await?;

    Ok(Json(dto::stats_to_json(
        total_likes(&blogs),
        favorite_post(&blogs),
        most_prolific_author(&blogs),
    )))
}
