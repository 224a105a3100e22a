//! Document trait: identity + schema for records kept in a document store.

use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::error::DomainResult;

/// A record that can be persisted by a document store.
///
/// Stores call [`Document::validate`] on every insert and update and enforce
/// uniqueness of every pair returned by [`Document::unique_keys`], so handlers
/// never validate inline.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Strongly-typed document identifier.
    type Id: Copy
        + Eq
        + core::hash::Hash
        + core::fmt::Debug
        + core::fmt::Display
        + Into<Uuid>
        + Send
        + Sync
        + 'static;

    /// Collection (table) name.
    const COLLECTION: &'static str;

    /// Returns the document identifier.
    fn id(&self) -> Self::Id;

    /// Schema validation.
    fn validate(&self) -> DomainResult<()>;

    /// `(field, value)` pairs that must be unique across the collection.
    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}
