//! # Scalar Abstractions
//!
//! Domain-neutral scalar types mediated by the [`ScalarAdapter`] seam:
//! points in time and pointer-like references to documents in the external
//! store.
//!
//! ## Raw vs. Resolved References
//! ```text
//! RawReference<K>        known only by path, pre-persistence
//!        │
//!        │  ScalarAdapter::to_reference
//!        ▼
//! EntityReference<K>     path + id, backend-resolved
//! ```
//!
//! References are non-owning identifiers, never embedded object graphs; this
//! keeps Transaction, Customer, and User records free of cyclic ownership.
//!
//! [`ScalarAdapter`]: crate::adapter::ScalarAdapter

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Point In Time
// =============================================================================

/// An opaque instant.
///
/// The wire shape (`seconds` + `nanoseconds`) matches what managed document
/// backends store for timestamp fields, so payloads round-trip without
/// conversion. Domain code never derives wall-clock values from it directly;
/// conversion in either direction goes through the adapter.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct PointInTime {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl PointInTime {
    /// Builds an instant from raw epoch parts. Intended for adapter
    /// implementations; domain code obtains instants via [`now`].
    ///
    /// [`now`]: crate::adapter::now
    #[inline]
    pub const fn new(seconds: i64, nanoseconds: u32) -> Self {
        PointInTime {
            seconds,
            nanoseconds,
        }
    }
}

// =============================================================================
// Entity Kinds
// =============================================================================

/// Ties an entity payload type to the collection its documents live in.
///
/// Implemented by every persisted entity shape, which is what lets
/// references carry their target kind statically instead of as a naming
/// convention.
pub trait EntityKind {
    /// Collection name under the store root, e.g. `"customers"`.
    const COLLECTION: &'static str;
}

// =============================================================================
// References
// =============================================================================

/// An untyped `{ id, path }` pair.
///
/// This is what [`ScalarAdapter::to_reference`] returns; the trait stays
/// object-safe by leaving the kind parameter to callers, who retype through
/// [`EntityReference::from_any`].
///
/// [`ScalarAdapter::to_reference`]: crate::adapter::ScalarAdapter::to_reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnyReference {
    pub id: String,
    pub path: String,
}

/// A reference known only by path, not yet resolved by the backend.
///
/// Used on creation inputs: the caller names the target document, and
/// `create` resolves it into an [`EntityReference`] through the adapter.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RawReference<K> {
    pub path: String,
    #[serde(skip)]
    kind: PhantomData<fn() -> K>,
}

impl<K> RawReference<K> {
    /// Wraps an already-formed document path.
    pub fn from_path(path: impl Into<String>) -> Self {
        RawReference {
            path: path.into(),
            kind: PhantomData,
        }
    }

    /// Builds the path for a document of kind `K` from its bare id.
    pub fn to_document(id: &str) -> Self
    where
        K: EntityKind,
    {
        RawReference::from_path(crate::paths::document_path::<K>(id))
    }
}

/// A resolved pointer to a document of kind `K`: full path plus the id the
/// backend derived from it. Produced only through the adapter.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct EntityReference<K> {
    pub id: String,
    pub path: String,
    #[serde(skip)]
    kind: PhantomData<fn() -> K>,
}

impl<K> EntityReference<K> {
    /// Retypes an adapter-produced reference to its target kind.
    pub fn from_any(reference: AnyReference) -> Self {
        EntityReference {
            id: reference.id,
            path: reference.path,
            kind: PhantomData,
        }
    }

    /// Downgrades to the path-only form.
    pub fn as_raw(&self) -> RawReference<K> {
        RawReference::from_path(self.path.clone())
    }
}

// Manual impls: the kind parameter is phantom, so none of these should
// require anything of `K`.

impl<K> Clone for RawReference<K> {
    fn clone(&self) -> Self {
        RawReference::from_path(self.path.clone())
    }
}

impl<K> fmt::Debug for RawReference<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawReference").field("path", &self.path).finish()
    }
}

impl<K> PartialEq for RawReference<K> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl<K> Eq for RawReference<K> {}

impl<K> Clone for EntityReference<K> {
    fn clone(&self) -> Self {
        EntityReference {
            id: self.id.clone(),
            path: self.path.clone(),
            kind: PhantomData,
        }
    }
}

impl<K> fmt::Debug for EntityReference<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityReference")
            .field("id", &self.id)
            .field("path", &self.path)
            .finish()
    }
}

impl<K> PartialEq for EntityReference<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.path == other.path
    }
}

impl<K> Eq for EntityReference<K> {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::Customer;

    #[test]
    fn test_point_in_time_ordering() {
        let earlier = PointInTime::new(100, 0);
        let later_by_nanos = PointInTime::new(100, 1);
        let later_by_seconds = PointInTime::new(101, 0);

        assert!(earlier < later_by_nanos);
        assert!(later_by_nanos < later_by_seconds);
    }

    #[test]
    fn test_point_in_time_wire_shape() {
        let at = PointInTime::new(1700000000, 500);
        let json = serde_json::to_value(&at).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "seconds": 1700000000, "nanoseconds": 500 })
        );
    }

    #[test]
    fn test_raw_reference_to_document() {
        let reference = RawReference::<Customer>::to_document("abc123");
        assert_eq!(reference.path, "customers/abc123");
    }

    #[test]
    fn test_reference_serde_skips_kind() {
        let reference = EntityReference::<Customer>::from_any(AnyReference {
            id: "abc123".into(),
            path: "customers/abc123".into(),
        });
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "abc123", "path": "customers/abc123" })
        );

        let back: EntityReference<Customer> = serde_json::from_value(json).unwrap();
        assert_eq!(back, reference);
    }
}
