//! Implements a SQLite backed document store.
//!
//! Each collection is a table with an id column and the document serialized
//! as JSON. Queries run on tokio's blocking thread pool, never on an async
//! worker.

use std::{
    fmt::Debug,
    marker::PhantomData,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::{
    Error,
    document::{Document, DocumentId},
    stores::DocumentStore,
};

/// Creates and retrieves documents of type `T` to/from a SQLite database.
pub struct SQLiteDocumentStore<T> {
    connection: Arc<Mutex<Connection>>,
    document: PhantomData<fn() -> T>,
}

impl<T: Document> SQLiteDocumentStore<T> {
    /// Create a new document store with a SQLite database.
    ///
    /// The table for `T` must already exist, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            connection,
            document: PhantomData,
        }
    }

    /// Run `query` with the locked connection on the blocking thread pool.
    async fn with_connection<F, R>(&self, query: F) -> Result<R, Error>
    where
        F: FnOnce(&mut Connection) -> Result<R, Error> + Send + 'static,
        R: Send + 'static,
    {
        let connection = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let mut connection = connection
                .lock()
                .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
                .map_err(|_| Error::DatabaseLockError)?;

            query(&mut connection)
        })
        .await
        .map_err(|error| Error::BlockingTaskFailed(error.to_string()))?
    }
}

impl<T> Clone for SQLiteDocumentStore<T> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            document: PhantomData,
        }
    }
}

impl<T> Debug for SQLiteDocumentStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SQLiteDocumentStore")
            .field("document", &std::any::type_name::<T>())
            .finish()
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for SQLiteDocumentStore<T> {
    async fn find_all(&self) -> Result<Vec<T>, Error> {
        self.with_connection(|connection| select_all(connection))
            .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, Error> {
        let id = id.to_owned();

        self.with_connection(move |connection| select_by_id(&id, connection))
            .await
    }

    async fn save(&self, document: T) -> Result<T, Error> {
        self.with_connection(move |connection| upsert(document, connection))
            .await
    }

    /// Save all documents in a single SQL transaction.
    ///
    /// # Errors
    /// If any document fails to save, none of them are saved.
    async fn save_all(&self, documents: Vec<T>) -> Result<Vec<T>, Error> {
        self.with_connection(move |connection| {
            let transaction = connection.transaction()?;

            let saved = documents
                .into_iter()
                .map(|document| upsert(document, &transaction))
                .collect::<Result<Vec<T>, Error>>()?;

            transaction.commit()?;

            Ok(saved)
        })
        .await
    }

    async fn count(&self) -> Result<u64, Error> {
        self.with_connection(|connection| {
            let count: i64 = connection.query_row(
                &format!("SELECT COUNT(*) FROM {};", T::COLLECTION),
                [],
                |row| row.get(0),
            )?;

            Ok(u64::try_from(count).unwrap_or_default())
        })
        .await
    }
}

/// Create the table for the collection of `T` if it does not exist.
pub fn create_document_table<T: Document>(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                document TEXT NOT NULL
            );",
            T::COLLECTION
        ),
        (),
    )?;

    Ok(())
}

fn select_all<T: Document>(connection: &Connection) -> Result<Vec<T>, Error> {
    connection
        .prepare(&format!(
            "SELECT id, document FROM {} ORDER BY rowid ASC;",
            T::COLLECTION
        ))?
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .map(|maybe_row| {
            let (id, json) = maybe_row?;
            map_document(id, &json)
        })
        .collect()
}

fn select_by_id<T: Document>(id: &str, connection: &Connection) -> Result<Option<T>, Error> {
    let json: Option<String> = connection
        .prepare(&format!(
            "SELECT document FROM {} WHERE id = :id;",
            T::COLLECTION
        ))?
        .query_row(&[(":id", id)], |row| row.get(0))
        .optional()?;

    json.map(|json| map_document(id.to_owned(), &json))
        .transpose()
}

/// Insert `document`, or replace the stored document with the same id.
fn upsert<T: Document>(mut document: T, connection: &Connection) -> Result<T, Error> {
    let id = document
        .id_mut()
        .get_or_insert_with(|| Uuid::new_v4().to_string())
        .clone();
    let json = serde_json::to_string(&document)?;

    connection.execute(
        &format!(
            "INSERT INTO {} (id, document) VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET document = excluded.document;",
            T::COLLECTION
        ),
        (&id, &json),
    )?;

    Ok(document)
}

fn map_document<T: Document>(id: DocumentId, json: &str) -> Result<T, Error> {
    let mut document: T = serde_json::from_str(json)?;
    // The id column is the source of truth.
    *document.id_mut() = Some(id);

    Ok(document)
}
