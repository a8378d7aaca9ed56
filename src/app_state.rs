//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    category::{Category, CategoryStore},
    db::initialize,
    resource::ResourceState,
    stores::SQLiteDocumentStore,
    vendor::{Vendor, VendorStore},
};

/// How requests for a document that does not exist are answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotFoundPolicy {
    /// GET by id answers `200 OK` with an empty body and PATCH answers
    /// `500 Internal Server Error`, matching the behaviour existing clients
    /// expect.
    #[default]
    Compatible,
    /// GET by id and PATCH both answer `404 Not Found`.
    Strict,
}

/// The state of the REST server.
///
/// The stores are passed in by the caller so that any [crate::DocumentStore]
/// implementation can back the API.
#[derive(Clone)]
pub struct AppState {
    /// The store for the category resource.
    pub category_store: Arc<CategoryStore>,

    /// The store for the vendor resource.
    pub vendor_store: Arc<VendorStore>,

    /// How missing documents are reported to the client.
    pub not_found_policy: NotFoundPolicy,
}

impl AppState {
    /// Create a new [AppState] from the stores for each resource.
    pub fn new(
        category_store: Arc<CategoryStore>,
        vendor_store: Arc<VendorStore>,
        not_found_policy: NotFoundPolicy,
    ) -> Self {
        Self {
            category_store,
            vendor_store,
            not_found_policy,
        }
    }

    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the documents.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn with_sqlite(
        db_connection: Connection,
        not_found_policy: NotFoundPolicy,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self::new(
            Arc::new(SQLiteDocumentStore::<Category>::new(connection.clone())),
            Arc::new(SQLiteDocumentStore::<Vendor>::new(connection)),
            not_found_policy,
        ))
    }
}

impl FromRef<AppState> for ResourceState<Category> {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.category_store.clone(),
            not_found_policy: state.not_found_policy,
        }
    }
}

impl FromRef<AppState> for ResourceState<Vendor> {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.vendor_store.clone(),
            not_found_policy: state.not_found_policy,
        }
    }
}
