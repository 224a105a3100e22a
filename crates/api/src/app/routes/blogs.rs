use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use bloglist_core::{BlogId, BlogPost, User};
use bloglist_infra::DocumentStore;

use crate::app::{dto, errors::ApiError, services::AppServices};
use crate::authz;
use crate::context::RequestPrincipal;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/:id", get(get_blog).put(update_likes).delete(delete_blog))
}

async fn list_blogs(Extension(services): Extension<Arc<AppServices>>) -> Result<impl IntoResponse, ApiError> {
    let blogs = services.blogs.find_all().await?;
    let users = services.users.find_all().await?;
    let owners: HashMap<_, _> = users.iter().map(|user| (user.id, user)).collect();

    Ok(Json(
        blogs
            .iter()
            .map(|blog| dto::blog_with_owner_to_json(blog, &owners))
            .collect::<Vec<_>>(),
    ))
}

async fn get_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: BlogId = id.parse()?;

    let blog = services
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("blog not found"))?;

    Ok(Json(dto::blog_to_json(&blog)))
}

async fn create_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<RequestPrincipal>,
    payload: Result<Json<dto::CreateBlogRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let principal = authz::require_author(&principal)?;
    let Json(body) = payload?;

    let blog = BlogPost::new(
        body.title.unwrap_or_default(),
        body.author,
        body.url.unwrap_or_default(),
        body.likes,
        principal.user_id,
    );
    let saved = services.blogs.insert(blog).await?;

    // The blog is only kept once the owner references it.
    let blog_id = saved.id;
    let linked = services
        .users
        .modify(principal.user_id, Box::new(move |owner: &mut User| owner.add_blog(blog_id)))
        .await;
    match linked {
        Ok(Some(_)) => {}
        Ok(None) => {
            discard_blog(&services, blog_id).await;
            return Err(ApiError::unauthorized("token missing or invalid"));
        }
        Err(e) => {
            discard_blog(&services, blog_id).await;
            return Err(e.into());
        }
    }

    tracing::info!(blog_id = %saved.id, user_id = %saved.user, "blog created");
    Ok((StatusCode::CREATED, Json(dto::blog_to_json(&saved))))
}

/// Any authenticated caller may change the like count; ownership is not checked.
async fn update_likes(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<RequestPrincipal>,
    Path(id): Path<String>,
    payload: Result<Json<dto::UpdateLikesRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require_author(&principal)?;
    let id: BlogId = id.parse()?;
    let Json(body) = payload?;
    let likes = body.likes.ok_or_else(|| ApiError::bad_request("likes missing"))?;

    let updated = services
        .blogs
        .modify(id, Box::new(move |blog: &mut BlogPost| blog.likes = likes))
        .await?
        .ok_or_else(|| ApiError::not_found("blog not found"))?;

    Ok(Json(dto::blog_to_json(&updated)))
}

async fn delete_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<RequestPrincipal>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    authz::require_author(&principal)?;
    let id: BlogId = id.parse()?;

    let blog = services
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("blog not found"))?;

    let owner_id = authz::authorize_delete(&principal, &blog)?.user_id;

    services.blogs.delete(id).await?;

    services
        .users
        .modify(
            owner_id,
            Box::new(move |owner: &mut User| {
                owner.remove_blog(id);
            }),
        )
        .await?;

    tracing::info!(blog_id = %id, user_id = %owner_id, "blog deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn discard_blog(services: &AppServices, id: BlogId) {
    if let Err(e) = services.blogs.delete(id).await {
        tracing::warn!(blog_id = %id, error = %e, "failed to discard unlinked blog");
    }
}
