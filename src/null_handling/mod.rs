//! This module serves as the public API for all null-handling logic built on the
//! bitmap engine.
//!
//! Columnar arrays track nullability as a separate validity bitmap. The helpers
//! here create, slice, combine and count those masks, and hand them to Arrow as
//! `NullBuffer`s.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Validity-mask construction and Arrow `NullBuffer` interop.
pub mod validity;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================

pub use validity::{
    combine_validity, null_count, slice_validity, to_null_buffer, validity_from_bools,
};

//==================================================================================
// 3. Unit Tests (Module-level integration tests)
//==================================================================================

#[cfg(test)]
mod validity_tests;
