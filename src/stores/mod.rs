//! Contains the trait and implementations for objects that persist [documents](crate::document::Document).

pub mod sqlite;

use async_trait::async_trait;

use crate::{Error, document::Document};

pub use sqlite::SQLiteDocumentStore;

/// Persists documents of type `T` in a single collection.
///
/// Only the operations the HTTP handlers and the seed loader need are exposed.
#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    /// Get every document in the collection, in insertion order.
    async fn find_all(&self) -> Result<Vec<T>, Error>;

    /// Get the document with `id`, or `None` if there is no such document.
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, Error>;

    /// Insert or replace `document`.
    ///
    /// A new id is assigned if the document does not have one. If a document
    /// with the same id already exists, it is replaced.
    async fn save(&self, document: T) -> Result<T, Error>;

    /// Save each document in `documents`, returning them with their ids.
    async fn save_all(&self, documents: Vec<T>) -> Result<Vec<T>, Error>;

    /// The number of documents in the collection.
    async fn count(&self) -> Result<u64, Error>;
}
