//! The category resource, e.g. 'Fruits' or 'Breads'.

use serde::{Deserialize, Serialize};

use crate::{
    document::{Document, DocumentId, patch_field},
    stores::DocumentStore,
};

/// The store interface for categories.
pub type CategoryStore = dyn DocumentStore<Category>;

/// A category of goods sold by vendors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Assigned by the store on first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    /// What the category contains, e.g. "Fruits".
    pub description: String,
}

impl Category {
    /// Create a category that has not been saved yet.
    pub fn new(description: &str) -> Self {
        Self {
            id: None,
            description: description.to_owned(),
        }
    }
}

/// The body of a PATCH request for a category.
///
/// Any `id` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    /// The new description, or `None` to leave it as is.
    #[serde(default)]
    pub description: Option<String>,
}

impl Document for Category {
    const COLLECTION: &'static str = "category";
    const NAME: &'static str = "Category";
    const PLURAL: &'static str = "categories";

    type Patch = CategoryPatch;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn id_mut(&mut self) -> &mut Option<DocumentId> {
        &mut self.id
    }

    fn apply_patch(&mut self, patch: CategoryPatch) -> bool {
        patch_field(&mut self.description, patch.description)
    }
}
