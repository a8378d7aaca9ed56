//! Defines the trait shared by every record type kept in the document store.

use serde::{Serialize, de::DeserializeOwned};

/// Alias for the opaque string identifier the store assigns to a document.
pub type DocumentId = String;

/// A record that can be persisted as a JSON document in its own collection.
///
/// The id is `None` until the record is saved for the first time, after which
/// the store guarantees it is present on every read.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The name of the collection (and SQLite table) holding this type.
    const COLLECTION: &'static str;

    /// A human readable name for the type, used in error messages.
    const NAME: &'static str;

    /// The plural name used in log messages, e.g. "categories".
    const PLURAL: &'static str;

    /// The partial form of the record accepted by PATCH requests.
    type Patch: DeserializeOwned + Send + 'static;

    /// The id of the document, if it has been saved.
    fn id(&self) -> Option<&str>;

    /// Mutable access to the id so the store and handlers can assign or clear it.
    fn id_mut(&mut self) -> &mut Option<DocumentId>;

    /// Apply the fields set in `patch` that differ from the current values.
    ///
    /// Returns `true` if any field changed. Fields missing from `patch` are
    /// never touched.
    fn apply_patch(&mut self, patch: Self::Patch) -> bool;
}

/// Overwrite `current` with `new` if `new` is set and differs.
///
/// Returns `true` if `current` was changed.
pub(crate) fn patch_field<T: PartialEq>(current: &mut T, new: Option<T>) -> bool {
    match new {
        Some(value) if *current != value => {
            *current = value;
            true
        }
        _ => false,
    }
}
