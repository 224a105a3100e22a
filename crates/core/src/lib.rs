//! `bloglist-core` — domain foundation: identifiers, documents, validation and
//! the pure blog statistics helpers.
//!
//! This crate contains **pure domain** code (no HTTP, storage or crypto).

pub mod document;
pub mod error;
pub mod id;
pub mod model;
pub mod stats;

pub use document::Document;
pub use error::{DomainError, DomainResult};
pub use id::{BlogId, ContactId, UserId};
pub use model::{BlogPost, Contact, MIN_CREDENTIAL_LEN, User, validate_credentials};
pub use stats::{AuthorCount, favorite_post, most_prolific_author, total_likes};
