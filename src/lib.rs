//! Pantry is a small REST API for managing the categories of goods on sale
//! and the vendors that sell them.
//!
//! The library provides the JSON endpoints, a SQLite backed document store,
//! and the seed data loaded on first start.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod category;
mod db;
mod document;
pub mod endpoints;
mod logging;
mod not_found;
mod resource;
mod routing;
mod seed;
mod stores;
mod vendor;

pub use app_state::{AppState, NotFoundPolicy};
pub use category::{Category, CategoryPatch, CategoryStore};
pub use db::initialize as initialize_db;
pub use document::{Document, DocumentId};
pub use logging::{LOG_BODY_LENGTH_LIMIT, MAX_REQUEST_BODY_SIZE, logging_middleware};
pub use routing::build_router;
pub use seed::{category_seed, seed_collection, seed_database, vendor_seed};
pub use stores::{DocumentStore, SQLiteDocumentStore};
pub use vendor::{Vendor, VendorPatch, VendorStore};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested document was not found.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the document has been created.
    #[error("{collection} with id of <{id}> not found")]
    NotFound {
        /// The name of the document type, e.g. "Category".
        collection: &'static str,
        /// The id that was requested.
        id: DocumentId,
    },

    /// A PATCH request referred to a document that does not exist.
    ///
    /// Unlike [Error::NotFound], this is reported to the client as an internal
    /// server error for compatibility with existing clients, see
    /// [NotFoundPolicy::Compatible].
    #[error("{collection} with id of <{id}> not found")]
    PatchMissingDocument {
        /// The name of the document type, e.g. "Vendor".
        collection: &'static str,
        /// The id that was requested.
        id: DocumentId,
    },

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A document could not be converted to or from JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// A database query running on the blocking thread pool panicked or was
    /// cancelled.
    #[error("a blocking database task failed: {0}")]
    BlockingTaskFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
            Error::PatchMissingDocument { .. } => {
                tracing::error!("{self}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    async fn body_json(error: Error) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = body_json(Error::NotFound {
            collection: "Category",
            id: "abc".to_owned(),
        })
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Category with id of <abc> not found" })
        );
    }

    #[tokio::test]
    async fn patch_missing_document_is_500_with_message() {
        let (status, body) = body_json(Error::PatchMissingDocument {
            collection: "Vendor",
            id: "dummyId".to_owned(),
        })
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Vendor with id of <dummyId> not found" })
        );
    }

    #[tokio::test]
    async fn internal_errors_are_not_shown_to_client() {
        let (status, body) = body_json(Error::SqlError(rusqlite::Error::InvalidQuery)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().contains("SQL"));
    }
}
