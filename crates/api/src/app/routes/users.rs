use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use bloglist_core::{User, validate_credentials};
use bloglist_infra::DocumentStore;

use crate::app::{dto, errors::ApiError, services::AppServices};

pub fn router() -> Router {
    Router::new().route("/", get(list_users).post(create_user))
}

async fn list_users(Extension(services): Extension<Arc<AppServices>>) -> Result<impl IntoResponse, ApiError> {
    let users = services.users.find_all().await?;
    let blogs = services.blogs.find_all().await?;
    let by_id: HashMap<_, _> = blogs.iter().map(|blog| (blog.id, blog)).collect();

    Ok(Json(
        users
            .iter()
            .map(|user| dto::user_with_blogs_to_json(user, &by_id))
            .collect::<Vec<_>>(),
    ))
}

async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let (username, password) = validate_credentials(body.username.as_deref(), body.password.as_deref())?;

    let hasher = services.hasher;
    let password = password.to_owned();
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

    let user = User::new(username, body.name, password_hash);
    let saved = services.users.insert(user).await?;

    tracing::info!(user_id = %saved.id, username = %saved.username, "user created");
    Ok((StatusCode::CREATED, Json(dto::user_to_json(&saved))))
}
