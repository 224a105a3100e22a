use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use chrono::Utc;

use bloglist_core::{Contact, ContactId};
use bloglist_infra::DocumentStore;

use crate::app::{dto, errors::ApiError, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route("/:id", get(get_contact).put(update_contact).delete(delete_contact))
}

async fn list_contacts(Extension(services): Extension<Arc<AppServices>>) -> Result<impl IntoResponse, ApiError> {
    let contacts = services.contacts.find_all().await?;
    Ok(Json(contacts.iter().map(dto::contact_to_json).collect::<Vec<_>>()))
}

async fn get_contact(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ContactId = id.parse()?;

    let contact = services
        .contacts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("person not found"))?;

    Ok(Json(dto::contact_to_json(&contact)))
}

async fn create_contact(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::CreateContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;

    let contact = Contact::new(body.name.unwrap_or_default(), body.number);
    let saved = services.contacts.insert(contact).await?;

    tracing::info!(contact_id = %saved.id, "contact created");
    Ok((StatusCode::CREATED, Json(dto::contact_to_json(&saved))))
}

async fn update_contact(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    payload: Result<Json<dto::UpdateContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ContactId = id.parse()?;
    let Json(body) = payload?;

    let updated = services
        .contacts
        .modify(
            id,
            Box::new(move |contact: &mut Contact| {
                if let Some(name) = body.name {
                    contact.name = name;
                }
                contact.number = body.number;
            }),
        )
        .await?
        .ok_or_else(|| ApiError::not_found("person not found"))?;

    Ok(Json(dto::contact_to_json(&updated)))
}

/// Idempotent: deleting an absent contact is still a success.
async fn delete_contact(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: ContactId = id.parse()?;

    if services.contacts.delete(id).await?.is_some() {
        tracing::info!(contact_id = %id, "contact deleted");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /info`: contact count and server time as a small HTML page.
pub async fn info(Extension(services): Extension<Arc<AppServices>>) -> Result<Html<String>, ApiError> {
    let count = services.contacts.count().await?;
    Ok(Html(format!(
        "<p>Phonebook has info for {count} people</p>\n<p>{}</p>",
        Utc::now().to_rfc2822()
    )))
}
