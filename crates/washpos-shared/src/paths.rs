//! # Document Paths
//!
//! The path conventions of the external document store, in one place so
//! every service and the client agree on where documents live.

use crate::scalar::EntityKind;

/// Path of the singleton app-settings document.
pub const APP_SETTINGS_PATH: &str = "app/appSettings";

/// Collection holding documents of kind `K`.
pub fn collection_path<K: EntityKind>() -> &'static str {
    K::COLLECTION
}

/// Path of the document of kind `K` with the given id.
pub fn document_path<K: EntityKind>(id: &str) -> String {
    format!("{}/{}", K::COLLECTION, id)
}
