//! # Error Types
//!
//! The error taxonomy of this crate is deliberately tiny: the only failure
//! the domain layer can produce on its own is reading the adapter registry
//! before the hosting application has configured it. Shape and type errors
//! are not validated here; boundary code (forms, import pipelines) validates
//! payloads before construction, and typed patches make field-level mistakes
//! unrepresentable.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors are enum variants, never String
//! 3. Fail loudly: an unconfigured adapter must never default silently

use thiserror::Error;

// =============================================================================
// Adapter Error
// =============================================================================

/// Errors raised by the adapter registry.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A registry capability was invoked before `set_adapter` ran.
    ///
    /// ## When This Occurs
    /// - The hosting application asked for the installed adapter before its
    ///   bootstrap sequence configured one
    ///
    /// Fatal to the calling operation; propagate it, never substitute a
    /// default value.
    #[error("{capability} not initialized")]
    NotInitialized { capability: &'static str },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with AdapterError.
pub type SharedResult<T> = Result<T, AdapterError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_message() {
        let err = AdapterError::NotInitialized {
            capability: "scalar adapter",
        };
        assert_eq!(err.to_string(), "scalar adapter not initialized");
    }
}
