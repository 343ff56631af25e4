//! # Scalar Adapter
//!
//! The pluggable conversion layer between domain-neutral scalars and the
//! native types of whichever backend technology hosts the data.
//!
//! ## The Seam
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ScalarAdapter                                      │
//! │                                                                         │
//! │   DateTime<Utc>  ──► point_in_time_from ──►  PointInTime               │
//! │   PointInTime    ──► point_in_time_to   ──►  DateTime<Utc>             │
//! │   "customers/x"  ──► to_reference       ──►  AnyReference              │
//! │                                                                         │
//! │   The entity layer compiles and behaves identically against any        │
//! │   backend that can supply these three capabilities.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Injection vs. Registry
//! Every domain operation that needs a conversion takes `&dyn ScalarAdapter`
//! as an explicit parameter, so "configure before use" is a compile-time
//! property of the call site. The process-wide registry exists only for host
//! bootstrap convenience (install once in the startup sequence, read
//! everywhere); reading it before [`set_adapter`] fails loudly with
//! [`AdapterError::NotInitialized`] rather than returning garbage.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::error::{AdapterError, SharedResult};
use crate::scalar::{AnyReference, EntityReference, PointInTime, RawReference};

// =============================================================================
// Capability Trait
// =============================================================================

/// The three conversion capabilities a backend must supply.
///
/// Implementations hold whatever backend handles they need (an SDK client,
/// a path validator); the domain layer only ever sees the neutral scalars.
pub trait ScalarAdapter: Send + Sync + std::fmt::Debug {
    /// Converts a wall-clock value to the backend-native instant.
    fn point_in_time_from(&self, at: DateTime<Utc>) -> PointInTime;

    /// Inverse conversion, used for display and export.
    fn point_in_time_to(&self, at: PointInTime) -> DateTime<Utc>;

    /// Resolves a document path string to a reference value.
    fn to_reference(&self, path: &str) -> AnyReference;
}

/// The adapter-defined current instant.
///
/// Always routes the wall clock through `point_in_time_from`, the same way
/// every other instant enters the domain layer.
#[inline]
pub fn now(adapter: &dyn ScalarAdapter) -> PointInTime {
    adapter.point_in_time_from(Utc::now())
}

/// Resolves a path-only reference into a typed, backend-resolved one.
pub fn resolve_reference<K>(
    adapter: &dyn ScalarAdapter,
    reference: &RawReference<K>,
) -> EntityReference<K> {
    EntityReference::from_any(adapter.to_reference(&reference.path))
}

// =============================================================================
// Process-Wide Registry
// =============================================================================

static INSTALLED: RwLock<Option<Arc<dyn ScalarAdapter>>> = RwLock::new(None);

/// Installs the process-wide adapter.
///
/// Called by the hosting application's bootstrap sequence, before anything
/// reads the registry. May be called again; the last write wins wholesale,
/// and re-installing an identical adapter is a no-op in effect.
pub fn set_adapter(adapter: Arc<dyn ScalarAdapter>) {
    let mut slot = INSTALLED.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(adapter);
}

/// Returns the installed adapter, or fails if bootstrap has not run yet.
pub fn installed() -> SharedResult<Arc<dyn ScalarAdapter>> {
    let slot = INSTALLED.read().unwrap_or_else(PoisonError::into_inner);
    slot.clone().ok_or(AdapterError::NotInitialized {
        capability: "scalar adapter",
    })
}

// =============================================================================
// Reference Implementation
// =============================================================================

/// A plain epoch-based adapter for tests and backends without native
/// timestamp or reference types.
///
/// Instants map to unix seconds + subsecond nanos; references take their id
/// from the last path segment, mirroring how document stores derive ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAdapter;

impl ScalarAdapter for SystemAdapter {
    fn point_in_time_from(&self, at: DateTime<Utc>) -> PointInTime {
        PointInTime::new(at.timestamp(), at.timestamp_subsec_nanos())
    }

    fn point_in_time_to(&self, at: PointInTime) -> DateTime<Utc> {
        // Out-of-range instants clamp to the epoch rather than panicking.
        DateTime::from_timestamp(at.seconds, at.nanoseconds).unwrap_or(DateTime::UNIX_EPOCH)
    }

    fn to_reference(&self, path: &str) -> AnyReference {
        let id = path.rsplit('/').next().unwrap_or(path);
        AnyReference {
            id: id.to_string(),
            path: path.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_adapter_instant_round_trip() {
        let adapter = SystemAdapter;
        let wall = DateTime::from_timestamp(1_700_000_000, 123_000_000).unwrap();

        let at = adapter.point_in_time_from(wall);
        assert_eq!(at, PointInTime::new(1_700_000_000, 123_000_000));
        assert_eq!(adapter.point_in_time_to(at), wall);
    }

    #[test]
    fn test_system_adapter_reference_id_from_path() {
        let adapter = SystemAdapter;
        let reference = adapter.to_reference("customers/abc123");
        assert_eq!(reference.id, "abc123");
        assert_eq!(reference.path, "customers/abc123");
    }

    #[test]
    fn test_now_routes_through_adapter() {
        let adapter = SystemAdapter;
        let before = Utc::now().timestamp();
        let at = now(&adapter);
        let after = Utc::now().timestamp();

        assert!(at.seconds >= before && at.seconds <= after);
    }

    // The registry is process-global, so its before/after behavior lives in
    // a single test fn; everything else injects adapters explicitly.
    #[test]
    fn test_registry_initialization() {
        let err = installed().expect_err("registry must start uninitialized");
        assert_eq!(err.to_string(), "scalar adapter not initialized");

        set_adapter(Arc::new(SystemAdapter));
        assert!(installed().is_ok());

        // Idempotent under repeated identical configuration.
        set_adapter(Arc::new(SystemAdapter));
        let adapter = installed().expect("registry stays configured");
        let reference = adapter.to_reference("users/u1");
        assert_eq!(reference.id, "u1");
    }
}
