//! # User Entity
//!
//! A staff member operating the shop. Users receive items, create
//! transactions, and appear inside transactions as denormalized snapshots.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::adapter::{now, ScalarAdapter};
use crate::record::{Payload, Record, RecordPatch};
use crate::scalar::{EntityKind, PointInTime};

// =============================================================================
// Payload
// =============================================================================

/// The stored shape of a user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub name: String,
    pub created_at: PointInTime,
    pub updated_at: PointInTime,
}

/// The display fields of a user, embedded in referencing documents to avoid
/// extra lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserSnapshot {
    pub name: String,
}

/// Caller-supplied fields for a new user; the system manages the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
}

// =============================================================================
// Mutations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UserPatch {
    Name(String),
}

impl RecordPatch<User> for UserPatch {
    fn field(&self) -> &'static str {
        match self {
            UserPatch::Name(_) => "name",
        }
    }

    fn apply(&self, data: &mut User) {
        match self {
            UserPatch::Name(name) => data.name = name.clone(),
        }
    }
}

impl Payload for User {
    type Patch = UserPatch;

    fn touch(&mut self, at: PointInTime) {
        self.updated_at = at;
    }
}

impl EntityKind for User {
    const COLLECTION: &'static str = "users";
}

// =============================================================================
// Construction Recipes
// =============================================================================

impl User {
    /// Builds a not-yet-persisted user, stamping both timestamps.
    pub fn create(adapter: &dyn ScalarAdapter, input: NewUser) -> Record<User> {
        let at = now(adapter);
        Record::new(User {
            name: input.name,
            created_at: at,
            updated_at: at,
        })
    }

    /// Zero-value payload for seeding a blank edit form.
    pub fn empty(adapter: &dyn ScalarAdapter) -> User {
        User::create(adapter, NewUser { name: String::new() }).into_data()
    }

    /// The snapshot embedded in documents that reference this user.
    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            name: self.name.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::SystemAdapter;

    #[test]
    fn test_create_stamps_both_timestamps_equal() {
        let adapter = SystemAdapter;
        let record = User::create(&adapter, NewUser { name: "Budi".into() });

        assert_eq!(record.id(), None);
        assert_eq!(record.data().name, "Budi");
        assert_eq!(record.data().created_at, record.data().updated_at);
    }

    #[test]
    fn test_empty_yields_blank_required_fields() {
        let adapter = SystemAdapter;
        let payload = User::empty(&adapter);
        assert_eq!(payload.name, "");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let payload = User {
            name: "Budi".into(),
            created_at: PointInTime::new(1, 0),
            updated_at: PointInTime::new(2, 0),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
