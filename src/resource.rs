//! Route handlers shared by every resource type.
//!
//! Each handler is generic over the [Document] type and is instantiated per
//! resource in [crate::build_router], e.g. `list_documents::<Category>`.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    Error, NotFoundPolicy,
    document::{Document, DocumentId},
    stores::DocumentStore,
};

/// The state needed by the handlers for the resource `T`.
#[derive(Clone)]
pub struct ResourceState<T: Document> {
    /// The store holding the documents of type `T`.
    pub store: Arc<dyn DocumentStore<T>>,
    /// How to respond when a request refers to a missing document.
    pub not_found_policy: NotFoundPolicy,
}

/// The body of a create request: either a JSON array of documents or a single
/// document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Batch<T> {
    /// A JSON array of documents.
    Many(Vec<T>),
    /// A single JSON object, treated as a batch of one.
    One(T),
}

impl<T> From<Batch<T>> for Vec<T> {
    fn from(batch: Batch<T>) -> Self {
        match batch {
            Batch::Many(documents) => documents,
            Batch::One(document) => vec![document],
        }
    }
}

/// A route handler for getting every document of type `T`.
pub async fn list_documents<T: Document>(
    State(state): State<ResourceState<T>>,
) -> Result<Json<Vec<T>>, Error> {
    state.store.find_all().await.map(Json)
}

/// A route handler for getting a document by its ID.
///
/// If there is no such document the response depends on the
/// [NotFoundPolicy]: an empty `200 OK` or a `404 Not Found`.
pub async fn get_document<T: Document>(
    Path(id): Path<DocumentId>,
    State(state): State<ResourceState<T>>,
) -> Result<Response, Error> {
    match state.store.find_by_id(&id).await? {
        Some(document) => Ok(Json(document).into_response()),
        None => match state.not_found_policy {
            NotFoundPolicy::Compatible => Ok(StatusCode::OK.into_response()),
            NotFoundPolicy::Strict => Err(Error::NotFound {
                collection: T::NAME,
                id,
            }),
        },
    }
}

/// A route handler for creating documents.
///
/// Client supplied ids are discarded and the store assigns new ones. Responds
/// with `201 Created` and no body.
pub async fn create_documents<T: Document>(
    State(state): State<ResourceState<T>>,
    Json(batch): Json<Batch<T>>,
) -> Result<StatusCode, Error> {
    let documents: Vec<T> = Vec::from(batch)
        .into_iter()
        .map(|mut document| {
            *document.id_mut() = None;
            document
        })
        .collect();

    let saved = state.store.save_all(documents).await?;
    tracing::debug!("created {} {} documents", saved.len(), T::COLLECTION);

    Ok(StatusCode::CREATED)
}

/// A route handler for replacing the document with the ID in the path.
///
/// The path ID always wins over any ID in the body. If there is no document
/// with the ID, one is created.
pub async fn replace_document<T: Document>(
    Path(id): Path<DocumentId>,
    State(state): State<ResourceState<T>>,
    Json(mut document): Json<T>,
) -> Result<Json<T>, Error> {
    *document.id_mut() = Some(id);

    state.store.save(document).await.map(Json)
}

/// A route handler for partially updating the document with the ID in the path.
///
/// Only the fields set in the body that differ from the stored document are
/// applied, and the document is only written back if something changed.
pub async fn patch_document<T: Document>(
    Path(id): Path<DocumentId>,
    State(state): State<ResourceState<T>>,
    Json(patch): Json<T::Patch>,
) -> Result<Json<T>, Error> {
    let Some(mut document) = state.store.find_by_id(&id).await? else {
        return Err(match state.not_found_policy {
            NotFoundPolicy::Compatible => Error::PatchMissingDocument {
                collection: T::NAME,
                id,
            },
            NotFoundPolicy::Strict => Error::NotFound {
                collection: T::NAME,
                id,
            },
        });
    };

    if document.apply_patch(patch) {
        state.store.save(document).await.map(Json)
    } else {
        tracing::debug!("patch for {} {id} changed nothing, skipping save", T::NAME);
        Ok(Json(document))
    }
}
