//! # Versioned Record
//!
//! Uniform mutation/read/identity semantics for every domain entity, built
//! by composition: a [`Record`] wraps a plain payload shape and adds an
//! optional identity plus change tracking, and each entity contributes a
//! typed patch enum instead of keyed dynamic access.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Record<T: Payload>                               │
//! │                                                                         │
//! │   data: T                  the plain payload the store (de)serializes   │
//! │   id: Option<String>       absent until the store assigns one           │
//! │   changes: field → patch   what changed since load, for partial updates │
//! │                                                                         │
//! │   set(adapter, patch) ──► apply ──► touch(now) ──► track               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No validation happens here: payload shapes are trusted data contracts,
//! and the typed patches already rule out wrong fields or wrong value types
//! at compile time.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::adapter::{now, ScalarAdapter};
use crate::scalar::PointInTime;

// =============================================================================
// Payload & Patch Traits
// =============================================================================

/// One typed mutation against a payload of type `T`.
///
/// Each entity defines an enum of these; a variant carries the new value and
/// knows the wire name of the field it writes.
pub trait RecordPatch<T> {
    /// Wire name of the written field, used as the change-tracking key.
    fn field(&self) -> &'static str;

    /// Writes the carried value into the payload.
    fn apply(&self, data: &mut T);
}

/// A plain data contract that can live inside a [`Record`].
pub trait Payload: Sized {
    /// The typed mutations this shape accepts.
    type Patch: RecordPatch<Self>;

    /// Refreshes the shape's `updated_at`, if it carries one.
    ///
    /// The default is a no-op; shapes with an `updated_at` field override
    /// it, which is how "every mutation bumps `updated_at` iff the shape has
    /// one" becomes a compile-time property instead of a runtime probe.
    fn touch(&mut self, _at: PointInTime) {}
}

// =============================================================================
// Record
// =============================================================================

/// A domain entity: payload + optional identity + pending changes.
pub struct Record<T: Payload> {
    id: Option<String>,
    data: T,
    changes: BTreeMap<&'static str, T::Patch>,
}

impl<T: Payload> Record<T> {
    /// Wraps a payload with no identity yet (not persisted).
    pub fn new(data: T) -> Self {
        Record {
            id: None,
            data,
            changes: BTreeMap::new(),
        }
    }

    /// Wraps a payload loaded from the store under the given identity.
    pub fn with_id(data: T, id: impl Into<String>) -> Self {
        Record {
            id: Some(id.into()),
            data,
            changes: BTreeMap::new(),
        }
    }

    /// The store-assigned identity. `None` until persisted; immutable after
    /// construction — the model never generates its own id.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Read-only view of the full payload, for reads and serialization.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Unwraps the payload, discarding identity and change tracking.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Applies one typed mutation.
    ///
    /// Writes the patch into the payload, refreshes `updated_at` to the
    /// adapter's now (when the shape has one), and records the patch under
    /// its field name — last write per field wins. No side effect is
    /// observable outside the record.
    pub fn set(&mut self, adapter: &dyn ScalarAdapter, patch: T::Patch) -> &mut Self {
        patch.apply(&mut self.data);
        self.data.touch(now(adapter));
        self.changes.insert(patch.field(), patch);
        self
    }

    /// Whether any field changed since construction or the last
    /// [`clear_changes`](Record::clear_changes).
    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Wire names of the changed fields, in stable order.
    pub fn changed_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.changes.keys().copied()
    }

    /// Forgets tracked changes, e.g. after the store flushed them.
    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }
}

impl<T: Payload> Record<T>
where
    T::Patch: Serialize,
{
    /// The tracked changes as a partial-update object (field → new value),
    /// ready for the persistence collaborator to merge into the stored
    /// document.
    ///
    /// The refreshed `updated_at` is not a tracked change; callers that
    /// issue partial updates include it from [`data`](Record::data).
    pub fn pending_update(&self) -> serde_json::Map<String, Value> {
        let mut update = serde_json::Map::new();
        for patch in self.changes.values() {
            // Externally tagged patch enums serialize to { "field": value }.
            if let Ok(Value::Object(entry)) = serde_json::to_value(patch) {
                update.extend(entry);
            }
        }
        update
    }
}

impl<T: Payload + fmt::Debug> fmt::Debug for Record<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.id)
            .field("data", &self.data)
            .field("changed", &self.changes.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
