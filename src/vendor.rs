//! The vendor resource: a person selling goods.

use serde::{Deserialize, Serialize};

use crate::{
    document::{Document, DocumentId, patch_field},
    stores::DocumentStore,
};

/// The store interface for vendors.
pub type VendorStore = dyn DocumentStore<Vendor>;

/// A vendor, serialized with camelCase field names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Assigned by the store on first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    /// Serialized as `firstName`.
    pub first_name: String,
    /// Serialized as `lastName`.
    pub last_name: String,
}

impl Vendor {
    /// Create a vendor that has not been saved yet.
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            id: None,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
        }
    }
}

/// The body of a PATCH request for a vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorPatch {
    /// The new first name, or `None` to leave it as is.
    #[serde(default)]
    pub first_name: Option<String>,
    /// The new last name, or `None` to leave it as is.
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Document for Vendor {
    const COLLECTION: &'static str = "vendor";
    const NAME: &'static str = "Vendor";
    const PLURAL: &'static str = "vendors";

    type Patch = VendorPatch;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn id_mut(&mut self) -> &mut Option<DocumentId> {
        &mut self.id
    }

    fn apply_patch(&mut self, patch: VendorPatch) -> bool {
        // Both fields must be visited, so no short-circuiting `||`.
        let first_name_changed = patch_field(&mut self.first_name, patch.first_name);
        let last_name_changed = patch_field(&mut self.last_name, patch.last_name);

        first_name_changed || last_name_changed
    }
}

#[cfg(test)]
mod vendor_patch_tests {
    use crate::document::Document;

    use super::{Vendor, VendorPatch};

    fn stored_vendor() -> Vendor {
        Vendor {
            id: Some("v1".to_owned()),
            first_name: "Bob".to_owned(),
            last_name: "Bobbins".to_owned(),
        }
    }

    #[test]
    fn patch_last_name_only() {
        let mut vendor = stored_vendor();

        let changed = vendor.apply_patch(VendorPatch {
            first_name: Some("Bob".to_owned()),
            last_name: Some("Miggins".to_owned()),
        });

        assert!(changed);
        assert_eq!(vendor.first_name, "Bob");
        assert_eq!(vendor.last_name, "Miggins");
    }

    #[test]
    fn patch_both_names() {
        let mut vendor = stored_vendor();

        let changed = vendor.apply_patch(VendorPatch {
            first_name: Some("Jim".to_owned()),
            last_name: Some("Jimmins".to_owned()),
        });

        assert!(changed);
        assert_eq!(vendor.first_name, "Jim");
        assert_eq!(vendor.last_name, "Jimmins");
    }

    #[test]
    fn identical_patch_is_not_a_change() {
        let mut vendor = stored_vendor();

        let changed = vendor.apply_patch(VendorPatch {
            first_name: Some("Bob".to_owned()),
            last_name: Some("Bobbins".to_owned()),
        });

        assert!(!changed);
        assert_eq!(vendor, stored_vendor());
    }

    #[test]
    fn missing_fields_are_untouched() {
        let patch: VendorPatch = serde_json::from_str(r#"{"lastName": "Dio"}"#).unwrap();
        let mut vendor = stored_vendor();

        let changed = vendor.apply_patch(patch);

        assert!(changed);
        assert_eq!(vendor.first_name, "Bob");
        assert_eq!(vendor.last_name, "Dio");
    }

    #[test]
    fn uses_camel_case_field_names() {
        let vendor: Vendor =
            serde_json::from_str(r#"{"id": "v2", "firstName": "Ozzy", "lastName": "Osbourne"}"#)
                .unwrap();

        assert_eq!(vendor.id.as_deref(), Some("v2"));
        assert_eq!(vendor.first_name, "Ozzy");
        assert_eq!(vendor.last_name, "Osbourne");
    }
}
