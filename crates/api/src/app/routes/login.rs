use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;
use serde_json::json;

use bloglist_auth::TokenIssuer;
use bloglist_core::User;
use bloglist_infra::DocumentStore;

use crate::app::{dto, errors::ApiError, services::AppServices};

const INVALID_CREDENTIALS: &str = "invalid username or password";

pub fn router() -> Router {
    Router::new().route("/", post(login))
}

/// Exchange credentials for a bearer token.
async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    let Some(user) = services.users.find_by_unique("username", &username).await? else {
        tracing::debug!(%username, "login for unknown user");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(&services, &user, password).await? {
        tracing::debug!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = services.tokens.issue(user.id, &user.username, Utc::now())?;

    Ok(Json(json!({
        "token": token,
        "username": user.username,
        "name": user.name,
    })))
}

async fn verify_password(services: &AppServices, user: &User, password: String) -> Result<bool, ApiError> {
    let hasher = services.hasher;
    let hash = user.password_hash.clone();
    Ok(tokio::task::spawn_blocking(move || hasher.verify(&password, &hash)).await??)
}
