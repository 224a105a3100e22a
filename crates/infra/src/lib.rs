//! Infrastructure layer: document storage behind the `DocumentStore` trait.

pub mod store;

pub use store::{DocumentStore, InMemoryDocumentStore, Modification, SharedStore, StoreError, StoreResult};
#[cfg(feature = "postgres")]
pub use store::postgres::PostgresDocumentStore;
