// In: src/error.rs

//! This module defines the single, unified error type for the tambak bitmap engine.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Note that almost nothing in this crate can fail: single-bit access, cursors,
//! counting, equality and the non-allocating copy/invert kernels are defined for
//! every input that satisfies their documented preconditions. The only runtime
//! failure of the engine proper is memory pool exhaustion.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BitmapError {
    // =========================================================================
    // === Engine Errors
    // =========================================================================
    /// The memory pool could not satisfy an allocation request. Raised only by
    /// the allocating range operations; never retried, never partially applied.
    #[error("Allocation of {requested} bytes failed: {reason}")]
    AllocationFailure { requested: usize, reason: String },

    // =========================================================================
    // === Boundary Errors (Arrow interop, configuration)
    // =========================================================================
    #[error("Bitmap buffer too small: {required_bits} bits required, {available_bits} available")]
    BufferTooSmall {
        required_bits: usize,
        available_bits: usize,
    },

    #[error("Validity length mismatch: left has {left} slots, right has {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g. opening a log file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while parsing a `BitmapConfig`.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl BitmapError {
    /// Shorthand used by the memory pools.
    pub(crate) fn allocation(requested: usize, reason: impl Into<String>) -> Self {
        BitmapError::AllocationFailure {
            requested,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_failure_message() {
        let err = BitmapError::allocation(128, "budget exhausted");
        assert_eq!(
            err.to_string(),
            "Allocation of 128 bytes failed: budget exhausted"
        );
    }

    #[test]
    fn test_serde_json_conversion() {
        let parse_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: BitmapError = parse_err.into();
        assert!(matches!(err, BitmapError::SerdeJson(_)));
    }
}
