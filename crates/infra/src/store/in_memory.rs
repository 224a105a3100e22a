use std::sync::RwLock;

use async_trait::async_trait;

use bloglist_core::{Document, DomainError};

use super::{DocumentStore, Modification, StoreError, StoreResult};

/// In-memory document store.
///
/// Intended for tests/dev. Keeps insertion order; lookups are linear scans.
#[derive(Debug)]
pub struct InMemoryDocumentStore<D> {
    docs: RwLock<Vec<D>>,
}

impl<D> InMemoryDocumentStore<D> {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }
}

impl<D> Default for InMemoryDocumentStore<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> InMemoryDocumentStore<D> {
    /// Build a store pre-populated with `docs`, validating each one.
    pub fn with_documents(docs: impl IntoIterator<Item = D>) -> StoreResult<Self> {
        let mut stored: Vec<D> = Vec::new();
        for doc in docs {
            doc.validate()?;
            check_unique(&stored, &doc)?;
            stored.push(doc);
        }
        Ok(Self {
            docs: RwLock::new(stored),
        })
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("lock poisoned")
}

/// Fail when another document already holds one of `doc`'s unique values.
fn check_unique<D: Document>(docs: &[D], doc: &D) -> Result<(), DomainError> {
    let id = doc.id();
    for (field, value) in doc.unique_keys() {
        let taken = docs
            .iter()
            .filter(|other| other.id() != id)
            .any(|other| other.unique_keys().iter().any(|(f, v)| *f == field && *v == value));
        if taken {
            return Err(DomainError::duplicate(field, value));
        }
    }
    Ok(())
}

#[async_trait]
impl<D: Document> DocumentStore<D> for InMemoryDocumentStore<D> {
    async fn find_all(&self) -> StoreResult<Vec<D>> {
        let docs = self.docs.read().map_err(|_| poisoned())?;
        Ok(docs.clone())
    }

    async fn find_by_id(&self, id: D::Id) -> StoreResult<Option<D>> {
        let docs = self.docs.read().map_err(|_| poisoned())?;
        Ok(docs.iter().find(|d| d.id() == id).cloned())
    }

    async fn find_by_unique(&self, field: &str, value: &str) -> StoreResult<Option<D>> {
        let docs = self.docs.read().map_err(|_| poisoned())?;
        Ok(docs
            .iter()
            .find(|d| d.unique_keys().iter().any(|(f, v)| *f == field && v == value))
            .cloned())
    }

    async fn insert(&self, doc: D) -> StoreResult<D> {
        doc.validate()?;

        let mut docs = self.docs.write().map_err(|_| poisoned())?;
        if docs.iter().any(|d| d.id() == doc.id()) {
            return Err(StoreError::backend(format!(
                "duplicate id {} in {}",
                doc.id(),
                D::COLLECTION
            )));
        }
        check_unique(&docs, &doc)?;
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn update(&self, doc: D) -> StoreResult<Option<D>> {
        doc.validate()?;

        let mut docs = self.docs.write().map_err(|_| poisoned())?;
        let Some(pos) = docs.iter().position(|d| d.id() == doc.id()) else {
            return Ok(None);
        };
        check_unique(&docs, &doc)?;
        docs[pos] = doc.clone();
        Ok(Some(doc))
    }

    async fn modify(&self, id: D::Id, change: Modification<D>) -> StoreResult<Option<D>> {
        let mut docs = self.docs.write().map_err(|_| poisoned())?;
        let Some(pos) = docs.iter().position(|d| d.id() == id) else {
            return Ok(None);
        };

        let mut doc = docs[pos].clone();
        change(&mut doc);
        doc.validate()?;
        check_unique(&docs, &doc)?;
        docs[pos] = doc.clone();
        Ok(Some(doc))
    }

    async fn delete(&self, id: D::Id) -> StoreResult<Option<D>> {
        let mut docs = self.docs.write().map_err(|_| poisoned())?;
        Ok(docs
            .iter()
            .position(|d| d.id() == id)
            .map(|pos| docs.remove(pos)))
    }

    async fn count(&self) -> StoreResult<usize> {
        let docs = self.docs.read().map_err(|_| poisoned())?;
        Ok(docs.len())
    }
}
