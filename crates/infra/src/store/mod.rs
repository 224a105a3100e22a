//! Document storage abstraction.
//!
//! A store keeps one collection of [`Document`]s. Every implementation runs
//! schema validation on insert and update and enforces the document's unique
//! keys, reporting both as [`DomainError`]s so the HTTP layer can translate
//! them uniformly.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use bloglist_core::{Document, DomainError};

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryDocumentStore;

/// Storage operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Validation, uniqueness or identifier failure raised by the store.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The backend itself failed (connection, serialization, poisoned lock).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// In-place change applied by [`DocumentStore::modify`].
pub type Modification<D> = Box<dyn FnOnce(&mut D) + Send>;

/// Collection-scoped document store.
///
/// Reads are consistent per document; there are no cross-document transactions.
#[async_trait]
pub trait DocumentStore<D: Document>: Send + Sync {
    /// All documents in insertion order.
    async fn find_all(&self) -> StoreResult<Vec<D>>;

    async fn find_by_id(&self, id: D::Id) -> StoreResult<Option<D>>;

    /// Look up a document by one of its unique keys (e.g. `username`).
    async fn find_by_unique(&self, field: &str, value: &str) -> StoreResult<Option<D>>;

    /// Validate and insert. Fails on validation or uniqueness violations.
    async fn insert(&self, doc: D) -> StoreResult<D>;

    /// Validate and replace the stored document with the same id.
    ///
    /// Returns `Ok(None)` when no such document exists; on error the stored
    /// document is left unchanged.
    async fn update(&self, doc: D) -> StoreResult<Option<D>>;

    /// Read, change and write back one document with no interleaved writes
    /// to it (read-modify-write under the store's lock or a row lock).
    ///
    /// Returns `Ok(None)` when no such document exists. The changed document
    /// is validated; on error the stored document is left unchanged.
    async fn modify(&self, id: D::Id, change: Modification<D>) -> StoreResult<Option<D>>;

    /// Remove a document, returning it if it existed.
    async fn delete(&self, id: D::Id) -> StoreResult<Option<D>>;

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.find_all().await?.len())
    }
}

/// Type-erased store handle shared across request handlers.
pub type SharedStore<D> = Arc<dyn DocumentStore<D>>;

#[async_trait]
impl<D, S> DocumentStore<D> for Arc<S>
where
    D: Document,
    S: DocumentStore<D> + ?Sized,
{
    async fn find_all(&self) -> StoreResult<Vec<D>> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: D::Id) -> StoreResult<Option<D>> {
        (**self).find_by_id(id).await
    }

    async fn find_by_unique(&self, field: &str, value: &str) -> StoreResult<Option<D>> {
        (**self).find_by_unique(field, value).await
    }

    async fn insert(&self, doc: D) -> StoreResult<D> {
        (**self).insert(doc).await
    }

    async fn update(&self, doc: D) -> StoreResult<Option<D>> {
        (**self).update(doc).await
    }

    async fn modify(&self, id: D::Id, change: Modification<D>) -> StoreResult<Option<D>> {
        (**self).modify(id, change).await
    }

    async fn delete(&self, id: D::Id) -> StoreResult<Option<D>> {
        (**self).delete(id).await
    }

    async fn count(&self) -> StoreResult<usize> {
        (**self).count().await
    }
}
